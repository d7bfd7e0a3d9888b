use std::fs;

use anyhow::{Context, Result};

use super::{Loadable, Resource, ResourceManager};

/// Decoded RGBA8 image, flipped so the first row is the bottom of the image.
#[derive(Debug, Default)]
pub struct Texture {
    name: String,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Texture {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Tightly packed RGBA rows, four bytes per texel.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl Resource for Texture {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Loadable for Texture {
    type Args = ();

    fn load(&mut self, name: &str, _: (), resources: &ResourceManager) -> Result<()> {
        let path = resources.resolve(name);
        let bytes =
            fs::read(&path).with_context(|| format!("unable to read texture {}", path.display()))?;
        let image = image::load_from_memory(&bytes)
            .with_context(|| format!("unable to decode texture {}", path.display()))?
            .flipv()
            .to_rgba8();

        let (width, height) = image.dimensions();
        self.name = name.to_string();
        self.width = width;
        self.height = height;
        self.pixels = image.into_raw();
        Ok(())
    }
}
