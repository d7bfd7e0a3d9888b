use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use log::{error, info};
use serde_json::Value;

use super::component::DestroyRequest;
use super::{Actor, ActorId, Component, Object, ObjectBase};
use crate::engine::Engine;
use crate::render::Renderer;
use crate::serial;
use crate::string_key::equals_ignore_case;

static NEXT_SCENE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(u64);

impl SceneId {
    pub(crate) fn next() -> Self {
        Self(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene#{}", self.0)
    }
}

/// Owns a set of actors and drives them frame by frame.
///
/// Actors are kept in insertion order, which is also update and draw
/// order. Destruction is deferred: an actor marked destroyed during
/// [`update`](Self::update) is reaped once every actor has been offered its
/// update for that frame.
#[derive(Debug)]
pub struct Scene {
    base: ObjectBase,
    id: SceneId,
    actors: Vec<Box<Actor>>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            base: ObjectBase::default(),
            id: SceneId::next(),
            actors: Vec::new(),
        }
    }
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: ObjectBase::named(name),
            ..Self::default()
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.base.name
    }

    pub fn is_active(&self) -> bool {
        self.base.active
    }

    /// Takes ownership of `actor`. With `start` set the actor is started
    /// right away; bulk loads defer that to [`start`](Self::start).
    pub fn add_actor(&mut self, mut actor: Box<Actor>, start: bool) {
        actor.set_scene(Some(self.id));
        self.actors.push(actor);
        if start {
            let index = self.actors.len() - 1;
            self.start_actor(index);
        }
    }

    /// Removes every non-persistent actor, or every actor when `force` is
    /// set. Survivors keep their order.
    pub fn remove_all_actors(&mut self, force: bool) {
        for actor in self
            .actors
            .iter_mut()
            .filter(|actor| force || !actor.persistent)
        {
            actor.destroyed();
        }
        self.actors.retain(|actor| !force && actor.persistent);
    }

    pub fn start(&mut self) {
        for index in 0..self.actors.len() {
            self.start_actor(index);
        }
    }

    fn start_actor(&mut self, index: usize) {
        let actor = &mut self.actors[index];
        actor.start();
        let requests = actor.take_requests();
        self.apply(requests);
    }

    pub fn update(&mut self, dt: f32) {
        for index in 0..self.actors.len() {
            let actor = &mut self.actors[index];
            if !actor.is_active() {
                continue;
            }
            actor.update(dt);
            let requests = actor.take_requests();
            self.apply(requests);
        }

        for actor in self.actors.iter_mut().filter(|actor| actor.is_destroyed()) {
            actor.destroyed();
        }
        self.actors.retain(|actor| !actor.is_destroyed());
    }

    fn apply(&mut self, requests: Vec<DestroyRequest>) {
        for request in requests {
            if let Some(actor) = self
                .actors
                .iter_mut()
                .find(|actor| request.matches(actor.id(), actor.name()))
            {
                actor.destroy();
            }
        }
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        for actor in self.actors.iter().filter(|actor| actor.is_active()) {
            actor.draw(renderer);
        }
    }

    /// Runs every actor's destroy hooks and drops them all.
    pub fn destroyed(&mut self) {
        for actor in self.actors.iter_mut() {
            actor.destroyed();
        }
        self.actors.clear();
    }

    /// Loads a scene document from disk and reads it into this scene.
    pub fn load<P: AsRef<Path>>(&mut self, path: P, engine: &Engine) -> Result<()> {
        let path = path.as_ref();
        let document = match serial::load(path) {
            Ok(document) => document,
            Err(err) => {
                error!("Could not load scene file {}: {err:#}", path.display());
                return Err(err);
            }
        };
        self.read(&document, engine);
        info!(
            "Loaded scene '{}' from {} ({} actors)",
            self.name(),
            path.display(),
            self.actors.len()
        );
        Ok(())
    }

    /// Registers `prototypes` with the factory and adds `actors` without
    /// starting them.
    pub fn read(&mut self, value: &Value, engine: &Engine) {
        self.base.read(value);

        for entry in serial::array(value, "prototypes").unwrap_or_default() {
            if let Some(mut actor) = engine.factory().create::<Actor>("Actor") {
                actor.read(entry, engine);
                let name = actor.name().to_string();
                engine.factory().register_prototype(&name, actor);
            }
        }

        for entry in serial::array(value, "actors").unwrap_or_default() {
            if let Some(mut actor) = engine.factory().create::<Actor>("Actor") {
                actor.read(entry, engine);
                self.add_actor(actor, false);
            }
        }
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.actors.iter().map(|actor| &**actor)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors().find(|actor| actor.id() == id)
    }

    pub fn actor_by_name(&self, name: &str) -> Option<&Actor> {
        self.actors()
            .find(|actor| equals_ignore_case(actor.name(), name))
    }

    pub fn actor_by_name_mut(&mut self, name: &str) -> Option<&mut Actor> {
        self.actors
            .iter_mut()
            .find(|actor| equals_ignore_case(actor.name(), name))
            .map(|actor| &mut **actor)
    }

    pub fn actors_by_tag(&self, tag: &str) -> Vec<&Actor> {
        self.actors()
            .filter(|actor| equals_ignore_case(&actor.tag, tag))
            .collect()
    }

    /// Actors carrying at least one component of type `C`.
    pub fn actors_of_type<C: Component>(&self) -> Vec<&Actor> {
        self.actors()
            .filter(|actor| actor.has_component::<C>())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}
