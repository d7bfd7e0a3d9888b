//! Cacheable assets and the shared cache that deduplicates them.

mod manager;
mod material;
mod model;
mod shader;
mod texture;

use std::any::Any;

use thiserror::Error;

pub use manager::{Res, ResourceManager};
pub use material::Material;
pub use model::{parse_obj, Model};
pub use shader::{Program, Shader, ShaderStage};
pub use texture::Texture;

/// Identity shared by every cached asset.
pub trait Resource: Any + Send + Sync {
    fn name(&self) -> &str;
}

/// A resource the cache knows how to build: default-construct, then `load`.
///
/// `Args` carries any extra load parameters; most resources use `()`.
pub trait Loadable: Resource + Default {
    type Args;

    fn load(&mut self, name: &str, args: Self::Args, resources: &ResourceManager)
        -> anyhow::Result<()>;
}

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("resource type mismatch: {key}")]
    TypeMismatch { key: String },
    #[error("could not load resource: {name}")]
    Load {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}
