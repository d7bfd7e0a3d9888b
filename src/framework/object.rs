use std::any::Any;

use serde_json::Value;

use super::Component;
use crate::engine::Engine;
use crate::serial;

/// Type-erasure helpers, implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Identity shared by every object: a name and an active flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectBase {
    pub name: String,
    pub active: bool,
}

impl Default for ObjectBase {
    fn default() -> Self {
        Self {
            name: String::new(),
            active: true,
        }
    }
}

impl ObjectBase {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn read(&mut self, value: &Value) {
        serial::read(value, "name", &mut self.name, false);
        serial::read(value, "active", &mut self.active, false);
    }
}

/// Anything the [`Factory`](super::Factory) can create by name: it can be
/// configured from a document and deep-copied as a prototype.
pub trait Object: AsAny {
    fn base(&self) -> &ObjectBase;
    fn base_mut(&mut self) -> &mut ObjectBase;

    fn name(&self) -> &str {
        &self.base().name
    }

    fn is_active(&self) -> bool {
        self.base().active
    }

    fn set_active(&mut self, active: bool) {
        self.base_mut().active = active;
    }

    /// Configures the object from a document. Missing fields keep their
    /// current values.
    fn read(&mut self, value: &Value, engine: &Engine);

    fn clone_object(&self) -> Box<dyn Object>;

    /// Hands the object over as a component when it is one.
    fn into_component(self: Box<Self>) -> Option<Box<dyn Component>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Clone, Default)]
    struct Marker {
        base: ObjectBase,
        value: i32,
    }

    impl Object for Marker {
        fn base(&self) -> &ObjectBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ObjectBase {
            &mut self.base
        }

        fn read(&mut self, value: &Value, _: &Engine) {
            self.base.read(value);
            serial::read(value, "value", &mut self.value, false);
        }

        fn clone_object(&self) -> Box<dyn Object> {
            Box::new(self.clone())
        }
    }

    #[test]
    fn base_reads_identity_fields() {
        let mut base = ObjectBase::named("before");
        base.read(&json!({ "name": "after", "active": false }));
        assert_eq!(base.name, "after");
        assert!(!base.active);

        base.read(&json!({}));
        assert_eq!(base.name, "after");
    }

    #[test]
    fn boxed_objects_downcast_to_their_concrete_type() {
        let engine = Engine::default();
        let mut object: Box<dyn Object> = Box::new(Marker::default());
        object.read(&json!({ "name": "m", "value": 7 }), &engine);

        let copy = object.clone_object();
        assert_eq!(copy.name(), "m");
        assert!(copy.into_component().is_none());

        let marker = object.into_any().downcast::<Marker>().unwrap();
        assert_eq!(marker.value, 7);
        assert!(marker.is_active());
    }
}
