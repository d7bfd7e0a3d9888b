use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use super::{Loadable, Res, Resource, ResourceManager};
use crate::serial;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShaderStage {
    #[default]
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "vert" | "vs" => Some(Self::Vertex),
            "frag" | "fs" => Some(Self::Fragment),
            _ => None,
        }
    }
}

/// Shader source for a single stage.
#[derive(Debug, Default)]
pub struct Shader {
    name: String,
    stage: ShaderStage,
    source: String,
}

impl Shader {
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Resource for Shader {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Loadable for Shader {
    type Args = ();

    fn load(&mut self, name: &str, _: (), resources: &ResourceManager) -> Result<()> {
        let path = resources.resolve(name);
        let stage = ShaderStage::from_path(&path)
            .ok_or_else(|| anyhow!("unknown shader stage for {}", path.display()))?;
        let source = fs::read_to_string(&path)
            .with_context(|| format!("unable to read shader {}", path.display()))?;
        self.name = name.to_string();
        self.stage = stage;
        self.source = source;
        Ok(())
    }
}

/// A linked pair of vertex and fragment shaders, described by a document:
///
/// ```json
/// { "vertexShader": "shaders/lit.vert", "fragmentShader": "shaders/lit.frag" }
/// ```
#[derive(Debug, Default)]
pub struct Program {
    name: String,
    vertex: Option<Res<Shader>>,
    fragment: Option<Res<Shader>>,
}

impl Program {
    pub fn vertex(&self) -> Option<&Shader> {
        self.vertex.as_deref()
    }

    pub fn fragment(&self) -> Option<&Shader> {
        self.fragment.as_deref()
    }
}

impl Resource for Program {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Loadable for Program {
    type Args = ();

    fn load(&mut self, name: &str, _: (), resources: &ResourceManager) -> Result<()> {
        let document = serial::load(resources.resolve(name))?;

        let mut vertex_name = String::new();
        serial::read(&document, "vertexShader", &mut vertex_name, true);
        let mut fragment_name = String::new();
        serial::read(&document, "fragmentShader", &mut fragment_name, true);

        let vertex = resources
            .get::<Shader>(&vertex_name, ())
            .ok_or_else(|| anyhow!("program {name} has no usable vertex shader"))?;
        let fragment = resources
            .get::<Shader>(&fragment_name, ())
            .ok_or_else(|| anyhow!("program {name} has no usable fragment shader"))?;
        if vertex.stage() != ShaderStage::Vertex || fragment.stage() != ShaderStage::Fragment {
            return Err(anyhow!("program {name} has mismatched shader stages"));
        }

        self.name = name.to_string();
        self.vertex = Some(vertex);
        self.fragment = Some(fragment);
        Ok(())
    }
}
