//! Actor/component scene graph and the name-driven object factory.

mod actor;
mod component;
mod factory;
mod object;
mod scene;

pub use actor::{Actor, ActorId};
pub use component::{Commands, Component, ComponentBase, ComponentClone, Owner};
pub use factory::{Factory, FactoryError};
pub use object::{AsAny, Object, ObjectBase};
pub use scene::{Scene, SceneId};
