use anyhow::{anyhow, Result};
use glam::{Vec2, Vec3};

use super::{Loadable, Program, Res, Resource, ResourceManager, Texture};
use crate::serial;

/// Surface description: a shader program plus textures and scalar inputs.
#[derive(Debug)]
pub struct Material {
    name: String,
    pub program: Option<Res<Program>>,
    pub base_map: Option<Res<Texture>>,
    pub specular_map: Option<Res<Texture>>,
    pub shininess: f32,
    pub tiling: Vec2,
    pub offset: Vec2,
    pub base_color: Vec3,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            program: None,
            base_map: None,
            specular_map: None,
            shininess: 2.0,
            tiling: Vec2::ONE,
            offset: Vec2::ZERO,
            base_color: Vec3::ONE,
        }
    }
}

impl Resource for Material {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Loadable for Material {
    type Args = ();

    fn load(&mut self, name: &str, _: (), resources: &ResourceManager) -> Result<()> {
        let document = serial::load(resources.resolve(name))?;

        let mut program_name = String::new();
        if !serial::read(&document, "program", &mut program_name, true) {
            return Err(anyhow!("material {name} does not name a program"));
        }
        self.program = Some(
            resources
                .get::<Program>(&program_name, ())
                .ok_or_else(|| anyhow!("material {name} has no usable program"))?,
        );

        let mut base_map = String::new();
        if serial::read(&document, "baseMap", &mut base_map, false) {
            self.base_map = resources.get::<Texture>(&base_map, ());
        }
        let mut specular_map = String::new();
        if serial::read(&document, "specularMap", &mut specular_map, false)
            && !specular_map.is_empty()
        {
            self.specular_map = resources.get::<Texture>(&specular_map, ());
        }

        serial::read(&document, "shininess", &mut self.shininess, false);
        serial::read(&document, "tiling", &mut self.tiling, false);
        serial::read(&document, "offset", &mut self.offset, false);
        serial::read(&document, "baseColor", &mut self.base_color, false);

        self.name = name.to_string();
        Ok(())
    }
}
