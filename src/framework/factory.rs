use std::any::type_name;
use std::collections::HashMap;

use log::{error, info};
use parking_lot::RwLock;
use thiserror::Error;

use super::{Actor, Component, Object};
use crate::string_key::to_lower;
use crate::transform::Transform;

#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("Could not create factory object: {name}")]
    NotRegistered { name: String },
    #[error("Factory object '{name}' is not a {expected}")]
    TypeMismatch { name: String, expected: &'static str },
}

enum Creator {
    Construct(fn() -> Box<dyn Object>),
    Prototype(Box<dyn Object>),
}

impl Creator {
    fn create(&self) -> Box<dyn Object> {
        match self {
            Creator::Construct(construct) => construct(),
            Creator::Prototype(prototype) => prototype.clone_object(),
        }
    }
}

fn construct<T: Object + Default>() -> Box<dyn Object> {
    Box::new(T::default())
}

/// Creates objects from case-insensitive type names, either fresh or by
/// cloning a registered prototype. A later registration under the same name
/// replaces the earlier one.
#[derive(Default)]
pub struct Factory {
    registry: RwLock<HashMap<String, Creator>>,
}

impl Factory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: Object + Default>(&self, name: &str) {
        info!("Registered {name} as a constructed type");
        self.insert(name, Creator::Construct(construct::<T>));
    }

    /// Takes ownership of `prototype`; [`create`](Self::create) will return
    /// deep copies of it.
    pub fn register_prototype(&self, name: &str, prototype: Box<dyn Object>) {
        info!("Registered {name} as a prototype");
        self.insert(name, Creator::Prototype(prototype));
    }

    fn insert(&self, name: &str, creator: Creator) {
        self.registry.write().insert(to_lower(name), creator);
    }

    fn create_object(&self, name: &str) -> Result<Box<dyn Object>, FactoryError> {
        self.registry
            .read()
            .get(&to_lower(name))
            .map(Creator::create)
            .ok_or_else(|| FactoryError::NotRegistered {
                name: name.to_string(),
            })
    }

    pub fn try_create<T: Object>(&self, name: &str) -> Result<Box<T>, FactoryError> {
        self.create_object(name)?
            .into_any()
            .downcast::<T>()
            .map_err(|_| FactoryError::TypeMismatch {
                name: name.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Creates an object and checks that it is a `T`. Failures are logged.
    pub fn create<T: Object>(&self, name: &str) -> Option<Box<T>> {
        match self.try_create(name) {
            Ok(object) => Some(object),
            Err(err) => {
                error!("{err}");
                None
            }
        }
    }

    pub fn try_create_component(&self, name: &str) -> Result<Box<dyn Component>, FactoryError> {
        self.create_object(name)?
            .into_component()
            .ok_or_else(|| FactoryError::TypeMismatch {
                name: name.to_string(),
                expected: "component",
            })
    }

    pub fn create_component(&self, name: &str) -> Option<Box<dyn Component>> {
        match self.try_create_component(name) {
            Ok(component) => Some(component),
            Err(err) => {
                error!("{err}");
                None
            }
        }
    }

    /// Creates an actor and places it at `transform`.
    pub fn instantiate(&self, name: &str, transform: Transform) -> Option<Box<Actor>> {
        let mut actor = self.create::<Actor>(name)?;
        actor.transform = transform;
        Some(actor)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry.read().contains_key(&to_lower(name))
    }

    pub fn len(&self) -> usize {
        self.registry.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.read().is_empty()
    }

    pub fn remove_all(&self) {
        self.registry.write().clear();
    }
}
