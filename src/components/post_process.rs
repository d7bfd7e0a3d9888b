use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use glam::Vec3;
use log::warn;
use serde_json::Value;

use crate::component_object;
use crate::engine::Engine;
use crate::framework::{Component, ComponentBase, Object, Owner};
use crate::serial::{self, SerialValue};
use crate::string_key::equals_ignore_case;

/// Screen effects a post-process pass can enable, packed as shader bits.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PostProcessFlags(u32);

impl PostProcessFlags {
    pub const NONE: Self = Self(0);
    pub const GRAYSCALE: Self = Self(1 << 0);
    pub const COLOR_TINT: Self = Self(1 << 1);
    pub const SCAN_LINE: Self = Self(1 << 2);
    pub const INVERT: Self = Self(1 << 3);
    pub const GRAIN: Self = Self(1 << 4);
    pub const DISTORT: Self = Self(1 << 5);

    const NAMED: [(&'static str, Self); 6] = [
        ("Grayscale", Self::GRAYSCALE),
        ("ColorTint", Self::COLOR_TINT),
        ("ScanLine", Self::SCAN_LINE),
        ("Invert", Self::INVERT),
        ("Grain", Self::GRAIN),
        ("Distort", Self::DISTORT),
    ];

    const ALL_BITS: u32 = (1 << 6) - 1;

    /// Keeps only the known effect bits.
    pub fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::ALL_BITS)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn set(&mut self, other: Self, enabled: bool) {
        if enabled {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(known, _)| equals_ignore_case(known, name))
            .map(|(_, flag)| *flag)
    }
}

impl BitOr for PostProcessFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PostProcessFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for PostProcessFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Self::NAMED
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
            .collect();
        write!(f, "PostProcessFlags({})", names.join(" | "))
    }
}

/// Accepts either the raw bit mask or a list of effect names.
impl SerialValue for PostProcessFlags {
    const KIND: &'static str = "effect list";

    fn from_value(value: &Value) -> Option<Self> {
        if let Some(bits) = value.as_u64() {
            return u32::try_from(bits).ok().map(Self::from_bits_truncate);
        }
        let mut flags = Self::NONE;
        for entry in value.as_array()? {
            let name = entry.as_str()?;
            match Self::from_name(name) {
                Some(flag) => flags |= flag,
                None => warn!("Unknown post-process effect '{name}'"),
            }
        }
        Some(flags)
    }
}

/// Values a post-process shader program consumes for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostProcessUniforms {
    pub parameters: u32,
    pub color_tint: Vec3,
    pub blend: f32,
    pub intensity: f32,
    pub time: f32,
}

/// Full-screen effect settings. `time` advances every update so animated
/// effects such as grain and distortion have a clock.
#[derive(Debug, Clone)]
pub struct PostProcessComponent {
    base: ComponentBase,
    pub parameters: PostProcessFlags,
    pub color_tint: Vec3,
    pub blend: f32,
    pub intensity: f32,
    pub time: f32,
}

impl Default for PostProcessComponent {
    fn default() -> Self {
        Self {
            base: ComponentBase::default(),
            parameters: PostProcessFlags::NONE,
            color_tint: Vec3::ONE,
            blend: 1.0,
            intensity: 1.0,
            time: 0.0,
        }
    }
}

impl PostProcessComponent {
    pub fn parameters(&self) -> PostProcessFlags {
        self.parameters
    }

    pub fn uniforms(&self) -> PostProcessUniforms {
        PostProcessUniforms {
            parameters: self.parameters.bits(),
            color_tint: self.color_tint,
            blend: self.blend,
            intensity: self.intensity,
            time: self.time,
        }
    }
}

impl Object for PostProcessComponent {
    component_object!();

    fn read(&mut self, value: &Value, _: &Engine) {
        self.base.object.read(value);
        serial::read(value, "parameters", &mut self.parameters, false);
        serial::read(value, "colorTint", &mut self.color_tint, false);
        serial::read(value, "blend", &mut self.blend, false);
        serial::read(value, "intensity", &mut self.intensity, false);
    }
}

impl Component for PostProcessComponent {
    fn component_base(&self) -> &ComponentBase {
        &self.base
    }

    fn component_base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn update(&mut self, dt: f32, _: &mut Owner<'_>) {
        self.time += dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Actor;
    use serde_json::json;

    #[test]
    fn reads_effect_names_and_settings() {
        let engine = Engine::default();
        let mut effect = PostProcessComponent::default();
        effect.read(
            &json!({
                "parameters": ["grayscale", "Grain", "Sparkle"],
                "colorTint": [1, 0.5, 0.25],
                "intensity": 0.5
            }),
            &engine,
        );
        let flags = effect.parameters();
        assert!(flags.contains(PostProcessFlags::GRAYSCALE));
        assert!(flags.contains(PostProcessFlags::GRAIN));
        assert!(!flags.contains(PostProcessFlags::INVERT));
        assert_eq!(flags.bits(), 0b1_0001);
        assert_eq!(effect.color_tint, Vec3::new(1.0, 0.5, 0.25));
        assert_eq!(effect.intensity, 0.5);
        assert_eq!(effect.blend, 1.0);

        effect.read(&json!({ "parameters": 0b10_1000 }), &engine);
        assert_eq!(
            effect.parameters(),
            PostProcessFlags::INVERT | PostProcessFlags::DISTORT
        );
    }

    #[test]
    fn toggles_single_effects() {
        let mut flags = PostProcessFlags::SCAN_LINE;
        flags.set(PostProcessFlags::COLOR_TINT, true);
        flags.set(PostProcessFlags::SCAN_LINE, false);
        assert_eq!(flags, PostProcessFlags::COLOR_TINT);
        assert_eq!(PostProcessFlags::from_bits_truncate(u32::MAX).bits(), 0b11_1111);
        assert!(PostProcessFlags::default().is_empty());
    }

    #[test]
    fn update_advances_the_effect_clock() {
        let mut actor = Actor::new("camera");
        actor.add_component(Box::new(PostProcessComponent {
            parameters: PostProcessFlags::GRAIN,
            ..PostProcessComponent::default()
        }));
        for _ in 0..4 {
            actor.update(0.25);
        }

        let uniforms = actor
            .component::<PostProcessComponent>()
            .map(PostProcessComponent::uniforms)
            .unwrap();
        assert!((uniforms.time - 1.0).abs() < 1e-6);
        assert_eq!(uniforms.parameters, PostProcessFlags::GRAIN.bits());
        assert_eq!(uniforms.color_tint, Vec3::ONE);
    }
}
