use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, error, warn};
use serde_json::Value;

use super::component::DestroyRequest;
use super::{Commands, Component, Object, ObjectBase, Owner, SceneId};
use crate::engine::Engine;
use crate::render::Renderer;
use crate::serial;
use crate::transform::Transform;

static NEXT_ACTOR_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique actor identity. Components refer to their owner by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(u64);

impl ActorId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// A scene entity: a transform plus an ordered list of owned components.
pub struct Actor {
    base: ObjectBase,
    id: ActorId,
    pub tag: String,
    /// Seconds left to live; zero or less lives forever.
    pub lifespan: f32,
    /// Survives a non-forced [`Scene::remove_all_actors`](super::Scene::remove_all_actors).
    pub persistent: bool,
    pub transform: Transform,
    destroyed: bool,
    scene: Option<SceneId>,
    components: Vec<Box<dyn Component>>,
    commands: Commands,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            base: ObjectBase::default(),
            id: ActorId::next(),
            tag: String::new(),
            lifespan: 0.0,
            persistent: false,
            transform: Transform::default(),
            destroyed: false,
            scene: None,
            components: Vec::new(),
            commands: Commands::default(),
        }
    }
}

/// Copies the configured fields and deep-clones each component onto the new
/// actor. The copy gets a fresh id, belongs to no scene and is alive.
impl Clone for Actor {
    fn clone(&self) -> Self {
        let mut actor = Self {
            base: self.base.clone(),
            tag: self.tag.clone(),
            lifespan: self.lifespan,
            persistent: self.persistent,
            transform: self.transform,
            ..Self::default()
        };
        for component in &self.components {
            actor.add_component(component.clone_component());
        }
        actor
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("id", &self.id)
            .field("name", &self.base.name)
            .field("tag", &self.tag)
            .field("destroyed", &self.destroyed)
            .field("components", &self.components.len())
            .finish()
    }
}

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: ObjectBase::named(name),
            ..Self::default()
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    pub(crate) fn set_scene(&mut self, scene: Option<SceneId>) {
        self.scene = scene;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Requests removal; the owning scene reaps the actor at the end of
    /// its next update.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    pub fn add_component(&mut self, mut component: Box<dyn Component>) {
        debug_assert!(
            component.owner().is_none(),
            "component is already attached to {:?}",
            component.owner()
        );
        component.component_base_mut().attach(self.id);
        self.components.push(component);
    }

    pub fn has_component<T: Component>(&self) -> bool {
        self.components.iter().any(|component| component.is::<T>())
    }

    pub fn component<T: Component>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|component| component.downcast_ref::<T>())
    }

    pub fn component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|component| component.downcast_mut::<T>())
    }

    pub fn components<T: Component>(&self) -> Vec<&T> {
        self.components
            .iter()
            .filter_map(|component| component.downcast_ref::<T>())
            .collect()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    fn split(&mut self) -> (&mut [Box<dyn Component>], Owner<'_>) {
        let Self {
            base,
            id,
            tag,
            transform,
            destroyed,
            scene,
            components,
            commands,
            ..
        } = self;
        let owner = Owner {
            id: *id,
            name: &base.name,
            tag,
            scene: *scene,
            destroyed,
            commands,
            transform,
        };
        (components.as_mut_slice(), owner)
    }

    /// Starts every component in attachment order. A component that fails
    /// to start is logged and left attached; the actor still reports success.
    pub fn start(&mut self) -> bool {
        let (components, mut owner) = self.split();
        for component in components.iter_mut() {
            if !component.start(&mut owner) {
                warn!(
                    "Component {} on actor {} failed to start",
                    component.name(),
                    owner.name()
                );
            }
        }
        if self.scene.is_none() {
            self.drop_requests();
        }
        true
    }

    pub fn update(&mut self, dt: f32) {
        if self.destroyed {
            return;
        }
        if self.lifespan > 0.0 {
            self.lifespan -= dt;
            if self.lifespan <= 0.0 {
                self.destroyed = true;
                return;
            }
        }

        let (components, mut owner) = self.split();
        for component in components.iter_mut().filter(|c| c.is_active()) {
            component.update(dt, &mut owner);
        }
        if self.scene.is_none() {
            self.drop_requests();
        }
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        if self.destroyed {
            return;
        }
        for component in self.components.iter().filter(|c| c.is_active()) {
            if let Some(drawable) = component.as_renderer() {
                drawable.draw(renderer, &self.transform);
            }
        }
    }

    /// Runs every component's destroy hook. Requests queued from those hooks
    /// are discarded.
    pub fn destroyed(&mut self) {
        let (components, mut owner) = self.split();
        for component in components.iter_mut() {
            component.destroyed(&mut owner);
        }
        self.drop_requests();
    }

    fn drop_requests(&mut self) {
        let dropped = self.commands.take();
        if !dropped.is_empty() {
            debug!(
                "Dropping {} request(s) from actor {} with no scene to apply them",
                dropped.len(),
                self.base.name
            );
        }
    }

    pub(crate) fn take_requests(&mut self) -> Vec<DestroyRequest> {
        self.commands.take()
    }
}

impl Object for Actor {
    fn base(&self) -> &ObjectBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn read(&mut self, value: &Value, engine: &Engine) {
        self.base.read(value);
        serial::read(value, "tag", &mut self.tag, false);
        serial::read(value, "lifespan", &mut self.lifespan, false);
        serial::read(value, "persistent", &mut self.persistent, false);
        if let Some(transform) = serial::object(value, "transform") {
            self.transform.read(transform);
        }

        for entry in serial::array(value, "components").unwrap_or_default() {
            let mut kind = String::new();
            if !serial::read(entry, "type", &mut kind, false) {
                error!("Component on actor '{}' has no type", self.base.name);
                continue;
            }
            match engine.factory().try_create_component(&kind) {
                Ok(mut component) => {
                    component.read(entry, engine);
                    self.add_component(component);
                }
                Err(err) => error!("Skipping component on actor '{}': {err}", self.base.name),
            }
        }
    }

    fn clone_object(&self) -> Box<dyn Object> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component_object;
    use crate::framework::ComponentBase;
    use glam::Vec3;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Tally {
        base: ComponentBase,
        value: i32,
        updates: Arc<AtomicUsize>,
        succeed: bool,
        target: String,
    }

    impl Object for Tally {
        component_object!();

        fn read(&mut self, value: &Value, _: &Engine) {
            self.base.object.read(value);
            serial::read(value, "value", &mut self.value, false);
        }
    }

    impl Component for Tally {
        fn component_base(&self) -> &ComponentBase {
            &self.base
        }

        fn component_base_mut(&mut self) -> &mut ComponentBase {
            &mut self.base
        }

        fn start(&mut self, _: &mut Owner<'_>) -> bool {
            self.succeed
        }

        fn update(&mut self, _: f32, owner: &mut Owner<'_>) {
            self.updates.fetch_add(1, Ordering::SeqCst);
            owner.transform.position.x += 1.0;
            if !self.target.is_empty() {
                owner.commands().destroy_by_name(&self.target);
            }
        }

        fn destroyed(&mut self, owner: &mut Owner<'_>) {
            if !self.target.is_empty() {
                owner.commands().destroy_by_name(&self.target);
            }
        }
    }

    fn engine() -> Engine {
        let engine = Engine::default();
        engine.factory().register::<Tally>("Tally");
        engine
    }

    #[test]
    fn lifespan_expiry_skips_that_frames_updates() {
        let updates = Arc::new(AtomicUsize::new(0));
        let mut actor = Actor::new("shot");
        actor.lifespan = 0.5;
        actor.add_component(Box::new(Tally {
            updates: Arc::clone(&updates),
            ..Tally::default()
        }));

        actor.update(0.25);
        assert!(!actor.is_destroyed());
        assert_eq!(updates.load(Ordering::SeqCst), 1);

        actor.update(0.25);
        assert!(actor.is_destroyed());
        assert_eq!(updates.load(Ordering::SeqCst), 1);

        actor.update(0.25);
        assert_eq!(updates.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn inactive_components_are_skipped() {
        let updates = Arc::new(AtomicUsize::new(0));
        let mut actor = Actor::new("a");
        let mut tally = Tally {
            updates: Arc::clone(&updates),
            ..Tally::default()
        };
        tally.set_active(false);
        actor.add_component(Box::new(tally));
        actor.update(0.1);
        assert_eq!(updates.load(Ordering::SeqCst), 0);
        assert_eq!(actor.transform.position, Vec3::ZERO);
    }

    #[test]
    fn failed_component_start_is_ignored() {
        let mut actor = Actor::new("a");
        actor.add_component(Box::new(Tally::default()));
        assert!(actor.start());
        assert_eq!(actor.component_count(), 1);
    }

    #[test]
    fn read_skips_bad_component_entries() {
        let engine = engine();
        let mut actor = Actor::default();
        actor.read(
            &json!({
                "name": "Player",
                "tag": "hero",
                "persistent": true,
                "transform": { "position": [1, 2, 3] },
                "components": [
                    { "type": "Tally", "value": 1 },
                    { "type": "NoSuchComponent" },
                    { "value": 9 },
                    { "type": "tally", "value": 3 }
                ]
            }),
            &engine,
        );
        assert_eq!(actor.name(), "Player");
        assert_eq!(actor.tag, "hero");
        assert!(actor.persistent);
        assert_eq!(actor.transform.position, Vec3::new(1.0, 2.0, 3.0));
        let values: Vec<i32> = actor.components::<Tally>().iter().map(|t| t.value).collect();
        assert_eq!(values, vec![1, 3]);
        assert!(actor
            .components::<Tally>()
            .iter()
            .all(|t| t.owner() == Some(actor.id())));
    }

    #[test]
    fn clones_own_independent_components() {
        let mut original = Actor::new("template");
        original.add_component(Box::new(Tally {
            value: 4,
            ..Tally::default()
        }));

        let mut copy = original.clone();
        assert_ne!(copy.id(), original.id());
        assert_eq!(copy.name(), "template");
        assert_eq!(
            copy.component::<Tally>().and_then(|t| t.owner()),
            Some(copy.id())
        );

        if let Some(tally) = copy.component_mut::<Tally>() {
            tally.value = 10;
        }
        assert_eq!(original.component::<Tally>().map(|t| t.value), Some(4));
        assert_eq!(copy.component::<Tally>().map(|t| t.value), Some(10));
        assert!(copy.has_component::<Tally>());
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn attaching_an_owned_component_twice_panics() {
        let mut first = Actor::new("first");
        first.add_component(Box::new(Tally::default()));
        let component = first.components.remove(0);
        let mut second = Actor::new("second");
        second.add_component(component);
    }

    #[test]
    fn clones_of_destroyed_actors_are_alive() {
        let mut actor = Actor::new("husk");
        actor.add_component(Box::new(Tally::default()));
        actor.destroy();

        let mut copy = actor.clone();
        assert!(actor.is_destroyed());
        assert!(!copy.is_destroyed());
        copy.update(0.1);
        assert_eq!(copy.transform.position.x, 1.0);
    }

    #[test]
    fn requests_without_a_scene_are_discarded() {
        let mut actor = Actor::new("loner");
        actor.add_component(Box::new(Tally {
            target: "enemy".to_string(),
            ..Tally::default()
        }));

        actor.update(0.1);
        assert!(actor.take_requests().is_empty());

        actor.set_scene(Some(SceneId::next()));
        actor.update(0.1);
        assert_eq!(actor.take_requests().len(), 1);

        actor.destroyed();
        assert!(actor.take_requests().is_empty());
    }
}
