use glam::{EulerRot, Quat, Vec3};
use serde_json::Value;

use crate::component_object;
use crate::engine::Engine;
use crate::framework::{Component, ComponentBase, Object, Owner};
use crate::serial;

/// Spins its owner by `rotate` degrees per second around the local axes.
#[derive(Debug, Clone, Default)]
pub struct RotationComponent {
    base: ComponentBase,
    pub rotate: Vec3,
}

impl Object for RotationComponent {
    component_object!();

    fn read(&mut self, value: &Value, _: &Engine) {
        self.base.object.read(value);
        serial::read(value, "rotate", &mut self.rotate, false);
    }
}

impl Component for RotationComponent {
    fn component_base(&self) -> &ComponentBase {
        &self.base
    }

    fn component_base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn update(&mut self, dt: f32, owner: &mut Owner<'_>) {
        let step = self.rotate * dt;
        let delta = Quat::from_euler(
            EulerRot::XYZ,
            step.x.to_radians(),
            step.y.to_radians(),
            step.z.to_radians(),
        );
        let rotation = owner.transform.rotation_quat() * delta;
        owner.transform.set_rotation_quat(rotation);
    }
}
