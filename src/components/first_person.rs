use std::sync::Arc;

use glam::{EulerRot, Quat, Vec3};
use serde_json::Value;

use crate::component_object;
use crate::engine::Engine;
use crate::framework::{Component, ComponentBase, Object, Owner};
use crate::input::{InputState, KeyCode, MouseButton};
use crate::serial;

/// Mouse-look and WASD/QE fly controller. Looking around requires the
/// right mouse button to be held.
#[derive(Debug, Clone)]
pub struct FirstPersonController {
    base: ComponentBase,
    /// Units per second.
    pub speed: f32,
    /// Degrees per unit of mouse movement.
    pub sensitivity: f32,
    yaw: f32,
    pitch: f32,
    input: Option<Arc<InputState>>,
}

impl Default for FirstPersonController {
    fn default() -> Self {
        Self {
            base: ComponentBase::default(),
            speed: 3.0,
            sensitivity: 0.1,
            yaw: 0.0,
            pitch: 0.0,
            input: None,
        }
    }
}

impl FirstPersonController {
    pub fn with_input(input: Arc<InputState>) -> Self {
        Self {
            input: Some(input),
            ..Self::default()
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

impl Object for FirstPersonController {
    component_object!();

    fn read(&mut self, value: &Value, engine: &Engine) {
        self.base.object.read(value);
        serial::read(value, "speed", &mut self.speed, false);
        serial::read(value, "sensitivity", &mut self.sensitivity, false);
        self.input = Some(Arc::clone(engine.input()));
    }
}

impl Component for FirstPersonController {
    fn component_base(&self) -> &ComponentBase {
        &self.base
    }

    fn component_base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn start(&mut self, owner: &mut Owner<'_>) -> bool {
        self.pitch = owner.transform.rotation.x;
        self.yaw = owner.transform.rotation.y;
        true
    }

    fn update(&mut self, dt: f32, owner: &mut Owner<'_>) {
        let Some(input) = &self.input else {
            return;
        };

        if input.is_mouse_button_down(MouseButton::RIGHT) {
            let axis = input.mouse_delta() * self.sensitivity;
            self.yaw -= axis.x;
            self.pitch = (self.pitch - axis.y).clamp(-89.0, 89.0);
        }
        owner.transform.set_rotation_quat(Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            0.0,
        ));

        let transform = &*owner.transform;
        let mut direction = Vec3::ZERO;
        let held = |ch| input.is_key_down(KeyCode::letter(ch));
        if held('a') {
            direction -= transform.right();
        }
        if held('d') {
            direction += transform.right();
        }
        if held('e') {
            direction += transform.up();
        }
        if held('q') {
            direction -= transform.up();
        }
        if held('w') {
            direction += transform.forward();
        }
        if held('s') {
            direction -= transform.forward();
        }

        owner.transform.position += direction.normalize_or_zero() * (self.speed * dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Actor;
    use glam::Vec2;

    fn controlled(input: &Arc<InputState>) -> Actor {
        let mut actor = Actor::new("player");
        actor.add_component(Box::new(FirstPersonController::with_input(Arc::clone(
            input,
        ))));
        actor.start();
        actor
    }

    #[test]
    fn moves_along_forward_at_speed() {
        let input = Arc::new(InputState::new());
        let mut actor = controlled(&input);
        input.set_key_down(KeyCode::letter('w'));
        actor.update(1.0);
        assert!((actor.transform.position - Vec3::new(0.0, 0.0, -3.0)).length() < 1e-4);

        input.set_key_up(KeyCode::letter('w'));
        input.set_key_down(KeyCode::letter('d'));
        input.set_key_down(KeyCode::letter('e'));
        actor.update(1.0);
        let moved = actor.transform.position - Vec3::new(0.0, 0.0, -3.0);
        assert!((moved.length() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn mouse_look_needs_the_right_button_and_clamps_pitch() {
        let input = Arc::new(InputState::new());
        let mut actor = controlled(&input);

        input.set_mouse_position(Vec2::new(100.0, 0.0));
        actor.update(0.016);
        assert_eq!(actor.component::<FirstPersonController>().unwrap().yaw(), 0.0);

        input.end_frame();
        input.set_mouse_button_down(MouseButton::RIGHT);
        input.set_mouse_position(Vec2::new(200.0, -5000.0));
        actor.update(0.016);
        let controller = actor.component::<FirstPersonController>().unwrap();
        assert!((controller.yaw() + 10.0).abs() < 1e-4);
        assert_eq!(controller.pitch(), 89.0);
    }

    #[test]
    fn start_copies_the_owner_rotation() {
        let input = Arc::new(InputState::new());
        let mut actor = Actor::new("player");
        actor.transform.rotation = Vec3::new(15.0, 45.0, 0.0);
        actor.add_component(Box::new(FirstPersonController::with_input(input)));
        actor.start();
        let controller = actor.component::<FirstPersonController>().unwrap();
        assert_eq!((controller.pitch(), controller.yaw()), (15.0, 45.0));
    }
}
