//! Core of the Neu engine: an actor/component scene graph built from JSON
//! documents, a name-driven object factory with prototype cloning, a
//! shared resource cache and a synchronous event bus.
//!
//! Windowing, audio and the GPU backend live outside the crate. Scenes are
//! drawn through the [`Renderer`] trait so the whole lifecycle can run
//! headless in tools and tests.

pub mod components;
pub mod config;
pub mod engine;
pub mod event;
pub mod framework;
pub mod input;
pub mod render;
pub mod resource;
pub mod serial;
pub mod string_key;
pub mod time;
pub mod transform;

pub use config::EngineConfig;
pub use engine::Engine;
pub use event::{Event, EventData, EventManager, Observer};
pub use framework::{
    Actor, ActorId, Commands, Component, ComponentBase, Factory, FactoryError, Object, ObjectBase,
    Owner, Scene, SceneId,
};
pub use input::{InputState, KeyCode, MouseButton, NamedKey};
pub use render::{DrawCall, HeadlessRenderer, Renderer, RendererComponent};
pub use resource::{Loadable, Res, Resource, ResourceError, ResourceManager};
pub use time::Time;
pub use transform::Transform;
