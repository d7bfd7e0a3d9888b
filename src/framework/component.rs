use super::{ActorId, Object, ObjectBase, SceneId};
use crate::render::RendererComponent;
use crate::string_key::equals_ignore_case;
use crate::transform::Transform;

/// State every component carries: identity plus the id of the actor it is
/// attached to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentBase {
    pub object: ObjectBase,
    owner: Option<ActorId>,
}

impl ComponentBase {
    pub fn owner(&self) -> Option<ActorId> {
        self.owner
    }

    pub(crate) fn attach(&mut self, owner: ActorId) {
        self.owner = Some(owner);
    }

    pub fn detach(&mut self) {
        self.owner = None;
    }
}

/// Modular behaviour attached to exactly one [`Actor`](super::Actor).
///
/// Hooks receive an [`Owner`] view of the actor they are attached to. The
/// actor drives them in attachment order.
pub trait Component: Object + ComponentClone {
    fn component_base(&self) -> &ComponentBase;
    fn component_base_mut(&mut self) -> &mut ComponentBase;

    fn owner(&self) -> Option<ActorId> {
        self.component_base().owner()
    }

    /// Returns `false` when the component could not initialise.
    fn start(&mut self, _owner: &mut Owner<'_>) -> bool {
        true
    }

    fn update(&mut self, dt: f32, owner: &mut Owner<'_>);

    fn destroyed(&mut self, _owner: &mut Owner<'_>) {}

    /// Exposes the drawing capability of renderer components.
    fn as_renderer(&self) -> Option<&dyn RendererComponent> {
        None
    }
}

impl dyn Component {
    pub fn is<T: Component>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Deep copy of a component with its owner cleared.
pub trait ComponentClone {
    fn clone_component(&self) -> Box<dyn Component>;
}

impl<T: Component + Clone> ComponentClone for T {
    fn clone_component(&self) -> Box<dyn Component> {
        let mut copy = self.clone();
        copy.component_base_mut().detach();
        Box::new(copy)
    }
}

/// Implements the [`Object`] plumbing of a component type that keeps its
/// [`ComponentBase`] in a field named `base`. Expand inside `impl Object`.
#[macro_export]
macro_rules! component_object {
    () => {
        fn base(&self) -> &$crate::framework::ObjectBase {
            &self.base.object
        }

        fn base_mut(&mut self) -> &mut $crate::framework::ObjectBase {
            &mut self.base.object
        }

        fn clone_object(&self) -> ::std::boxed::Box<dyn $crate::framework::Object> {
            let mut copy = ::std::clone::Clone::clone(self);
            copy.base.detach();
            ::std::boxed::Box::new(copy)
        }

        fn into_component(
            self: ::std::boxed::Box<Self>,
        ) -> ::std::option::Option<::std::boxed::Box<dyn $crate::framework::Component>> {
            ::std::option::Option::Some(self)
        }
    };
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DestroyRequest {
    Id(ActorId),
    Name(String),
}

impl DestroyRequest {
    pub(crate) fn matches(&self, id: ActorId, name: &str) -> bool {
        match self {
            DestroyRequest::Id(target) => *target == id,
            DestroyRequest::Name(target) => equals_ignore_case(target, name),
        }
    }
}

/// Requests a component makes of the scene that owns its actor. The scene
/// applies them right after the issuing actor's start or update. Requests
/// only take effect inside a scene: an actor with no scene, or one running
/// its destroy hooks, discards them.
#[derive(Debug, Default)]
pub struct Commands {
    requests: Vec<DestroyRequest>,
}

impl Commands {
    pub fn destroy(&mut self, id: ActorId) {
        self.requests.push(DestroyRequest::Id(id));
    }

    /// Marks the first actor whose name matches (ignoring case).
    pub fn destroy_by_name(&mut self, name: &str) {
        self.requests.push(DestroyRequest::Name(name.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub(crate) fn take(&mut self) -> Vec<DestroyRequest> {
        std::mem::take(&mut self.requests)
    }
}

/// Mutable view of the actor a component is attached to.
pub struct Owner<'a> {
    pub(crate) id: ActorId,
    pub(crate) name: &'a str,
    pub(crate) tag: &'a str,
    pub(crate) scene: Option<SceneId>,
    pub(crate) destroyed: &'a mut bool,
    pub(crate) commands: &'a mut Commands,
    pub transform: &'a mut Transform,
}

impl Owner<'_> {
    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn tag(&self) -> &str {
        self.tag
    }

    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    pub fn is_destroyed(&self) -> bool {
        *self.destroyed
    }

    /// Marks the owning actor for removal at the end of the frame.
    pub fn destroy(&mut self) {
        *self.destroyed = true;
    }

    pub fn commands(&mut self) -> &mut Commands {
        &mut *self.commands
    }
}
