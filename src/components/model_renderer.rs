use serde_json::Value;

use crate::component_object;
use crate::engine::Engine;
use crate::framework::{Component, ComponentBase, Object, Owner};
use crate::render::{Renderer, RendererComponent};
use crate::resource::{Material, Model, Res};
use crate::serial;
use crate::transform::Transform;

/// Draws a cached model with an optional material at its owner's transform.
#[derive(Debug, Clone, Default)]
pub struct ModelRenderer {
    base: ComponentBase,
    pub model: Option<Res<Model>>,
    pub material: Option<Res<Material>>,
}

impl Object for ModelRenderer {
    component_object!();

    fn read(&mut self, value: &Value, engine: &Engine) {
        self.base.object.read(value);

        let mut model = String::new();
        if serial::read(value, "model", &mut model, true) {
            self.model = engine.resources().get::<Model>(&model, ());
        }
        let mut material = String::new();
        if serial::read(value, "material", &mut material, false) {
            self.material = engine.resources().get::<Material>(&material, ());
        }
    }
}

impl Component for ModelRenderer {
    fn component_base(&self) -> &ComponentBase {
        &self.base
    }

    fn component_base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn update(&mut self, _: f32, _: &mut Owner<'_>) {}

    fn as_renderer(&self) -> Option<&dyn RendererComponent> {
        Some(self)
    }
}

impl RendererComponent for ModelRenderer {
    fn draw(&self, renderer: &mut dyn Renderer, transform: &Transform) {
        if let Some(model) = &self.model {
            renderer.draw_model(model, self.material.as_deref(), transform.matrix());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::framework::Actor;
    use crate::render::HeadlessRenderer;
    use glam::Vec3;
    use serde_json::json;
    use std::fs;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn draws_shared_models_with_owner_matrix() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("tri.obj"),
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        )
        .unwrap();
        let engine = Engine::new(EngineConfig {
            asset_root: dir.path().to_path_buf(),
            ..EngineConfig::default()
        });

        let mut first = ModelRenderer::default();
        first.read(&json!({ "model": "tri.obj" }), &engine);
        let mut second = ModelRenderer::default();
        second.read(&json!({ "model": "TRI.OBJ" }), &engine);
        assert!(Arc::ptr_eq(
            first.model.as_ref().unwrap(),
            second.model.as_ref().unwrap()
        ));
        assert!(first.material.is_none());

        let mut actor = Actor::new("mesh");
        actor.transform.position = Vec3::new(2.0, 0.0, 0.0);
        actor.add_component(Box::new(first));
        let mut renderer = HeadlessRenderer::new(64, 64);
        actor.draw(&mut renderer);

        let calls = renderer.draw_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "tri.obj");
        assert_eq!(calls[0].matrix, actor.transform.matrix());
    }

    #[test]
    fn missing_model_draws_nothing() {
        let engine = Engine::default();
        let mut renderer_component = ModelRenderer::default();
        renderer_component.read(&json!({ "model": "absent.obj" }), &engine);
        assert!(renderer_component.model.is_none());

        let mut renderer = HeadlessRenderer::new(64, 64);
        renderer_component.draw(&mut renderer, &Transform::default());
        assert!(renderer.draw_calls().is_empty());
    }
}
