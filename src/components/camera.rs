use glam::{Mat4, Vec3};
use serde_json::Value;

use crate::component_object;
use crate::engine::Engine;
use crate::framework::{Component, ComponentBase, Object, Owner};
use crate::serial;

/// Perspective camera looking down its owner's forward axis.
#[derive(Debug, Clone)]
pub struct CameraComponent {
    base: ComponentBase,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    view: Mat4,
    projection: Mat4,
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self {
            base: ComponentBase::default(),
            fov: 70.0,
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        }
    }
}

impl CameraComponent {
    pub fn set_perspective(&mut self, fov: f32, aspect: f32, near: f32, far: f32) {
        self.fov = fov;
        self.aspect = aspect;
        self.near = near;
        self.far = far;
    }

    pub fn set_look_at(&mut self, eye: Vec3, center: Vec3, up: Vec3) {
        self.view = Mat4::look_at_rh(eye, center, up);
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

impl Object for CameraComponent {
    component_object!();

    fn read(&mut self, value: &Value, engine: &Engine) {
        self.base.object.read(value);
        serial::read(value, "fov", &mut self.fov, false);
        if !serial::read(value, "aspect", &mut self.aspect, false) {
            self.aspect = engine.config().aspect();
        }
        serial::read(value, "near", &mut self.near, false);
        serial::read(value, "far", &mut self.far, false);
    }
}

impl Component for CameraComponent {
    fn component_base(&self) -> &ComponentBase {
        &self.base
    }

    fn component_base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn update(&mut self, _: f32, owner: &mut Owner<'_>) {
        let transform = &*owner.transform;
        self.set_look_at(
            transform.position,
            transform.position + transform.forward(),
            transform.up(),
        );
        self.projection =
            Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far);
    }
}
