use crate::data_structures::{
    cube_texture::CubeTexture,
    material::{Material, MeshMaterial},
    texture::Texture,
};

/// What is drawn behind everything else.
#[derive(Clone, Debug)]
pub enum Background {
    Color([f32; 3]),
    Texture(Texture),
    /// A cube texture seen from the inside, e.g. the same map used as `env_map`.
    Cube(CubeTexture),
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub background: Option<Background>,
    /// Environment map applied to standard materials that have none of their own.
    pub environment: Option<CubeTexture>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_environment(mut self, environment: CubeTexture) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Colour the frame is cleared with. Textured backgrounds are drawn over
    /// a black clear.
    pub fn clear_colour(&self) -> wgpu::Color {
        match &self.background {
            Some(Background::Color([r, g, b])) => wgpu::Color {
                r: *r as f64,
                g: *g as f64,
                b: *b as f64,
                a: 1.0,
            },
            Some(_) => wgpu::Color::BLACK,
            None => wgpu::Color::TRANSPARENT,
        }
    }

    /// The cube texture to draw as skybox, if the background is one.
    pub fn background_cube(&self) -> Option<&CubeTexture> {
        match &self.background {
            Some(Background::Cube(cube)) => Some(cube),
            _ => None,
        }
    }

    /// The environment map a material reflects: its own, else the scene's.
    /// Only standard materials reflect an environment.
    pub fn env_map_for<'a>(&'a self, material: &'a Material) -> Option<&'a CubeTexture> {
        match material {
            Material::Standard(_) => material.env_map().or(self.environment.as_ref()),
            _ => None,
        }
    }
}
