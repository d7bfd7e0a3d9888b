use glam::{Mat4, Vec3};
use serde_json::Value;

use crate::component_object;
use crate::engine::Engine;
use crate::framework::{Component, ComponentBase, Object, Owner};
use crate::serial;

/// Point light placed at its owner's position.
#[derive(Debug, Clone)]
pub struct LightComponent {
    base: ComponentBase,
    pub color: Vec3,
    position: Vec3,
}

impl Default for LightComponent {
    fn default() -> Self {
        Self {
            base: ComponentBase::default(),
            color: Vec3::ONE,
            position: Vec3::ZERO,
        }
    }
}

impl LightComponent {
    /// World position as of the last update.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Light position in the space described by `view`.
    pub fn view_position(&self, view: &Mat4) -> Vec3 {
        view.transform_point3(self.position)
    }
}

impl Object for LightComponent {
    component_object!();

    fn read(&mut self, value: &Value, _: &Engine) {
        self.base.object.read(value);
        serial::read(value, "color", &mut self.color, false);
    }
}

impl Component for LightComponent {
    fn component_base(&self) -> &ComponentBase {
        &self.base
    }

    fn component_base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn update(&mut self, _: f32, owner: &mut Owner<'_>) {
        self.position = owner.transform.position;
    }
}
