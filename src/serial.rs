//! Structured-document reader used by every `read` implementation.
//!
//! Documents are JSON objects. Field extraction follows one contract: a
//! missing or mistyped field leaves the destination untouched and returns
//! `false`; an error is logged only when the field was marked required.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use glam::{Vec2, Vec3};
use log::error;
use serde_json::Value;

/// Reads and parses a document from disk. The root must be an object.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read file: {}", path.display()))?;
    parse(&text).with_context(|| format!("could not parse document: {}", path.display()))
}

/// Parses a document held in memory.
pub fn parse(text: &str) -> Result<Value> {
    let document: Value = serde_json::from_str(text).context("invalid JSON")?;
    if !document.is_object() {
        return Err(anyhow!("document root is not an object"));
    }
    Ok(document)
}

/// A value that can be extracted from a named document field.
pub trait SerialValue: Sized {
    const KIND: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl SerialValue for bool {
    const KIND: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl SerialValue for i32 {
    const KIND: &'static str = "int";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64().and_then(|v| i32::try_from(v).ok())
    }
}

impl SerialValue for f32 {
    const KIND: &'static str = "float";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64().map(|v| v as f32)
    }
}

impl SerialValue for String {
    const KIND: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl SerialValue for Vec2 {
    const KIND: &'static str = "vec2";

    fn from_value(value: &Value) -> Option<Self> {
        let [x, y] = numbers::<2>(value)?;
        Some(Vec2::new(x, y))
    }
}

impl SerialValue for Vec3 {
    const KIND: &'static str = "vec3";

    fn from_value(value: &Value) -> Option<Self> {
        let [x, y, z] = numbers::<3>(value)?;
        Some(Vec3::new(x, y, z))
    }
}

impl SerialValue for Vec<i32> {
    const KIND: &'static str = "vector<int>";

    fn from_value(value: &Value) -> Option<Self> {
        value
            .as_array()?
            .iter()
            .map(<i32 as SerialValue>::from_value)
            .collect()
    }
}

fn numbers<const N: usize>(value: &Value) -> Option<[f32; N]> {
    let array = value.as_array()?;
    if array.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, element) in out.iter_mut().zip(array) {
        *slot = element.as_f64()? as f32;
    }
    Some(out)
}

/// Copies the named field into `data` when present and well typed.
pub fn read<T: SerialValue>(value: &Value, name: &str, data: &mut T, required: bool) -> bool {
    match value.get(name).and_then(T::from_value) {
        Some(parsed) => {
            *data = parsed;
            true
        }
        None => {
            if required {
                error!("Could not read document value ({}): {name}", T::KIND);
            }
            false
        }
    }
}

pub fn contains(value: &Value, name: &str) -> bool {
    value.get(name).is_some()
}

/// Returns the named field when it is an array.
pub fn array<'a>(value: &'a Value, name: &str) -> Option<&'a [Value]> {
    value.get(name).and_then(Value::as_array).map(Vec::as_slice)
}

/// Returns the named field when it is a nested object.
pub fn object<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    value.get(name).filter(|field| field.is_object())
}
