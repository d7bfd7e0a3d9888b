use std::sync::Arc;

use log::info;

use crate::components;
use crate::config::EngineConfig;
use crate::event::EventManager;
use crate::framework::{Actor, Factory};
use crate::input::InputState;
use crate::resource::ResourceManager;
use crate::time::Time;

/// Services shared by everything in a running game. Passed by reference to
/// every `read` so configuration code can reach the factory, the resource
/// cache, input and settings.
pub struct Engine {
    config: EngineConfig,
    factory: Factory,
    resources: ResourceManager,
    events: EventManager,
    input: Arc<InputState>,
    time: Time,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let factory = Factory::new();
        factory.register::<Actor>("Actor");
        components::register_builtins(&factory);

        info!(
            "Engine ready: assets at {}, {}x{}",
            config.asset_root.display(),
            config.width,
            config.height
        );
        Self {
            resources: ResourceManager::new(config.asset_root.clone()),
            time: Time::new(config.max_delta_time, config.time_scale),
            factory,
            events: EventManager::new(),
            input: Arc::new(InputState::new()),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn factory(&self) -> &Factory {
        &self.factory
    }

    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    pub fn events(&self) -> &EventManager {
        &self.events
    }

    pub fn input(&self) -> &Arc<InputState> {
        &self.input
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    /// Starts a frame from the wall clock and returns its delta time. Feed
    /// this frame's input afterwards.
    pub fn update(&mut self) -> f32 {
        self.time.tick();
        self.input.end_frame();
        self.time.delta_time()
    }

    /// Starts a frame of fixed length.
    pub fn step(&mut self, dt: f32) -> f32 {
        self.time.advance(dt);
        self.input.end_frame();
        self.time.delta_time()
    }

    /// Releases cached resources, registrations and subscriptions.
    pub fn shutdown(&self) {
        self.resources.remove_all();
        self.factory.remove_all();
        self.events.remove_all();
        info!("Engine shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn registers_actor_and_builtin_components() {
        let engine = Engine::default();
        for name in [
            "Actor",
            "RotationComponent",
            "LightComponent",
            "CameraComponent",
            "ModelRenderer",
            "PostProcessComponent",
            "FirstPersonController",
        ] {
            assert!(engine.factory().contains(name), "{name}");
        }
    }

    #[test]
    fn step_clamps_and_rolls_input_over() {
        let mut engine = Engine::default();
        engine.input().set_mouse_position(Vec2::new(10.0, 5.0));
        assert_eq!(engine.input().mouse_delta(), Vec2::new(10.0, 5.0));

        let dt = engine.step(1.0);
        assert!((dt - 1.0 / 30.0).abs() < 1e-6);
        assert_eq!(engine.input().mouse_delta(), Vec2::ZERO);
        assert_eq!(engine.time().frame(), 1);
    }

    #[test]
    fn shutdown_clears_services() {
        let engine = Engine::default();
        engine.shutdown();
        assert!(engine.factory().is_empty());
        assert!(engine.resources().is_empty());
    }
}
