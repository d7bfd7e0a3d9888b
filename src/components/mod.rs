//! Components shipped with the engine, registered under their type names.

mod camera;
mod first_person;
mod light;
mod model_renderer;
mod post_process;
mod rotation;

pub use camera::CameraComponent;
pub use first_person::FirstPersonController;
pub use light::LightComponent;
pub use model_renderer::ModelRenderer;
pub use post_process::{PostProcessComponent, PostProcessFlags, PostProcessUniforms};
pub use rotation::RotationComponent;

use crate::framework::Factory;

pub fn register_builtins(factory: &Factory) {
    factory.register::<CameraComponent>("CameraComponent");
    factory.register::<FirstPersonController>("FirstPersonController");
    factory.register::<LightComponent>("LightComponent");
    factory.register::<ModelRenderer>("ModelRenderer");
    factory.register::<PostProcessComponent>("PostProcessComponent");
    factory.register::<RotationComponent>("RotationComponent");
}
