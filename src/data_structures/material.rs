//! Mesh materials, their render state and texture slots.
//!
//! Three shading models are supported:
//!
//! - [`MeshStandardMaterial`] is physically based (metalness/roughness) and can
//!   reflect a cube environment map
//! - [`MeshMatcapMaterial`] takes all of its lighting from a matcap texture
//!   sampled by view-space normal
//! - [`MeshToonMaterial`] quantises diffuse lighting through a gradient map
//!
//! Every material exposes its bound textures through [`MeshMaterial::slots`],
//! which is what the GPU side iterates over to build bind groups.

use std::fmt;

use cgmath::Vector2;

use crate::{
    data_structures::{
        cube_texture::CubeTexture,
        geometry::{Geometry, UV, UV2},
        texture::{ColorSpace, Texture, TextureId},
    },
    error::AssetError,
};

/// Below this many vertices a displacement map has too few points to move.
pub const MIN_DISPLACEMENT_VERTICES: usize = 1024;

/// Which faces of a mesh are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

impl Side {
    pub fn cull_mode(self) -> Option<wgpu::Face> {
        match self {
            Side::Front => Some(wgpu::Face::Back),
            Side::Back => Some(wgpu::Face::Front),
            Side::Double => None,
        }
    }
}

/// Render state shared by every material.
///
/// Transparency, side and flat shading are baked into the render pipeline, so
/// changing them bumps [`version`](Self::version). Opacity only lives in the
/// uniform buffer and takes effect only while the material is transparent.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialSettings {
    transparent: bool,
    opacity: f32,
    side: Side,
    flat_shading: bool,
    version: u32,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            transparent: false,
            opacity: 1.0,
            side: Side::Front,
            flat_shading: false,
            version: 0,
        }
    }
}

impl MaterialSettings {
    pub fn transparent(&self) -> bool {
        self.transparent
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// The opacity the shader sees: the configured value while transparent, 1 otherwise.
    pub fn effective_opacity(&self) -> f32 {
        if self.transparent { self.opacity } else { 1.0 }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn flat_shading(&self) -> bool {
        self.flat_shading
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Force the pipeline to be rebuilt the next time the material is drawn.
    pub fn set_needs_update(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    pub fn set_transparent(&mut self, transparent: bool) {
        if self.transparent != transparent {
            self.transparent = transparent;
            self.set_needs_update();
        }
    }

    /// Clamped to `0.0..=1.0`. Non-finite values reset to fully opaque.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = if opacity.is_finite() { opacity.clamp(0.0, 1.0) } else { 1.0 };
        if !self.transparent && self.opacity < 1.0 {
            log::debug!("opacity {} has no effect until the material is transparent", self.opacity);
        }
    }

    pub fn set_side(&mut self, side: Side) {
        if self.side != side {
            self.side = side;
            self.set_needs_update();
        }
    }

    pub fn set_flat_shading(&mut self, flat_shading: bool) {
        if self.flat_shading != flat_shading {
            self.flat_shading = flat_shading;
            self.set_needs_update();
        }
    }

    pub fn cull_mode(&self) -> Option<wgpu::Face> {
        self.side.cull_mode()
    }

    pub fn blend_state(&self) -> wgpu::BlendState {
        if self.transparent {
            wgpu::BlendState::ALPHA_BLENDING
        } else {
            wgpu::BlendState::REPLACE
        }
    }
}

/// A place on a material a 2D texture (or, for `EnvMap`, a cube texture) can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// Base colour (albedo), multiplied with the material colour.
    Map,
    /// Greyscale opacity: black is fully transparent, white fully opaque.
    AlphaMap,
    /// Height texture that moves vertices along their normals.
    DisplacementMap,
    /// Tangent-space normal perturbation.
    NormalMap,
    /// Darkens crevices; sampled with the `uv2` channel.
    AoMap,
    /// Blue channel scales metalness.
    MetalnessMap,
    /// Green channel scales roughness.
    RoughnessMap,
    Matcap,
    /// Lookup for toon shading bands.
    GradientMap,
    EnvMap,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 10] = [
        TextureSlot::Map,
        TextureSlot::AlphaMap,
        TextureSlot::DisplacementMap,
        TextureSlot::NormalMap,
        TextureSlot::AoMap,
        TextureSlot::MetalnessMap,
        TextureSlot::RoughnessMap,
        TextureSlot::Matcap,
        TextureSlot::GradientMap,
        TextureSlot::EnvMap,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextureSlot::Map => "map",
            TextureSlot::AlphaMap => "alpha_map",
            TextureSlot::DisplacementMap => "displacement_map",
            TextureSlot::NormalMap => "normal_map",
            TextureSlot::AoMap => "ao_map",
            TextureSlot::MetalnessMap => "metalness_map",
            TextureSlot::RoughnessMap => "roughness_map",
            TextureSlot::Matcap => "matcap",
            TextureSlot::GradientMap => "gradient_map",
            TextureSlot::EnvMap => "env_map",
        }
    }

    /// Bit set in [`MaterialUniform::slots`] when this slot has a texture.
    pub fn bit(self) -> u32 {
        1 << self as u32
    }

    pub fn color_space(self) -> ColorSpace {
        match self {
            TextureSlot::Map | TextureSlot::Matcap | TextureSlot::EnvMap => ColorSpace::Srgb,
            _ => ColorSpace::Linear,
        }
    }

    /// Texel bound when the slot is empty; chosen so that it leaves shading unchanged.
    pub fn fallback_pixel(self) -> [u8; 4] {
        match self {
            TextureSlot::NormalMap => [128, 128, 255, 255],
            TextureSlot::DisplacementMap => [0, 0, 0, 255],
            _ => [255, 255, 255, 255],
        }
    }
}

/// Configuration that is accepted but will not render the way it reads.
#[derive(Clone, Debug, PartialEq)]
pub enum MaterialWarning {
    OpacityWithoutTransparency { opacity: f32 },
    AlphaMapWithoutTransparency,
    MetalnessOverriddenByMap { metalness: f32 },
    RoughnessOverriddenByMap { roughness: f32 },
    SparseDisplacementGeometry { vertices: usize },
    SmoothGradient,
}

impl fmt::Display for MaterialWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialWarning::OpacityWithoutTransparency { opacity } => {
                write!(f, "opacity {opacity} is ignored because the material is not transparent")
            }
            MaterialWarning::AlphaMapWithoutTransparency => {
                write!(f, "alpha map is ignored because the material is not transparent")
            }
            MaterialWarning::MetalnessOverriddenByMap { metalness } => {
                write!(f, "metalness {metalness} scales the metalness map; leave it at 1")
            }
            MaterialWarning::RoughnessOverriddenByMap { roughness } => {
                write!(f, "roughness {roughness} scales the roughness map; leave it at 1")
            }
            MaterialWarning::SparseDisplacementGeometry { vertices } => write!(
                f,
                "displacement map on a geometry with only {vertices} vertices, subdivide it to at least {MIN_DISPLACEMENT_VERTICES}"
            ),
            MaterialWarning::SmoothGradient => write!(
                f,
                "gradient map uses linear filtering or mip-maps, toon bands will blur"
            ),
        }
    }
}

/// Uniform block shared by all material shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    /// rgb colour and effective opacity
    pub color: [f32; 4],
    pub metalness: f32,
    pub roughness: f32,
    pub displacement_scale: f32,
    pub displacement_bias: f32,
    pub normal_scale: [f32; 2],
    pub ao_map_intensity: f32,
    pub env_map_intensity: f32,
    pub slots: u32,
    pub flat_shading: u32,
    pub _padding: [u32; 2],
}

impl MaterialUniform {
    fn new(color: [f32; 3], settings: &MaterialSettings) -> Self {
        Self {
            color: [color[0], color[1], color[2], settings.effective_opacity()],
            metalness: 0.0,
            roughness: 1.0,
            displacement_scale: 1.0,
            displacement_bias: 0.0,
            normal_scale: [1.0, 1.0],
            ao_map_intensity: 1.0,
            env_map_intensity: 1.0,
            slots: 0,
            flat_shading: settings.flat_shading() as u32,
            _padding: [0; 2],
        }
    }

    fn with_slots<'a>(mut self, slots: impl IntoIterator<Item = (TextureSlot, Option<&'a Texture>)>) -> Self {
        self.slots = slots
            .into_iter()
            .filter(|(_, texture)| texture.is_some())
            .fold(0, |bits, (slot, _)| bits | slot.bit());
        self
    }
}

/// Identity of everything a GPU bind group was built from.
///
/// Two equal signatures bind the same textures in the same state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialSignature {
    pub settings_version: u32,
    pub textures: Vec<(TextureSlot, Option<(TextureId, u32)>)>,
}

fn clamp_normal_scale(scale: Vector2<f32>) -> Vector2<f32> {
    let clamp = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 1.0 };
    Vector2::new(clamp(scale.x), clamp(scale.y))
}

/// Behaviour common to all mesh materials.
pub trait MeshMaterial {
    fn settings(&self) -> &MaterialSettings;

    fn settings_mut(&mut self) -> &mut MaterialSettings;

    /// Every 2D slot this material samples, bound or not, in binding order.
    fn slots(&self) -> Vec<(TextureSlot, Option<&Texture>)>;

    fn env_map(&self) -> Option<&CubeTexture> {
        None
    }

    fn uniform(&self) -> MaterialUniform;

    /// Material specific checks on top of the shared ones in [`lint`](Self::lint).
    fn lint_parameters(&self, _warnings: &mut Vec<MaterialWarning>) {}

    fn texture(&self, slot: TextureSlot) -> Option<&Texture> {
        self.slots()
            .into_iter()
            .find(|(s, _)| *s == slot)
            .and_then(|(_, texture)| texture)
    }

    fn signature(&self) -> MaterialSignature {
        let mut textures: Vec<_> = self
            .slots()
            .into_iter()
            .map(|(slot, texture)| (slot, texture.map(|t| (t.id(), t.version()))))
            .collect();
        textures.push((
            TextureSlot::EnvMap,
            self.env_map().map(|cube| (cube.id(), cube.version())),
        ));
        MaterialSignature {
            settings_version: self.settings().version(),
            textures,
        }
    }

    /// Report configuration that will not render as intended.
    fn lint(&self, geometry: Option<&Geometry>) -> Vec<MaterialWarning> {
        let mut warnings = Vec::new();
        let settings = self.settings();
        if !settings.transparent() {
            if settings.opacity() < 1.0 {
                warnings.push(MaterialWarning::OpacityWithoutTransparency {
                    opacity: settings.opacity(),
                });
            }
            if self.texture(TextureSlot::AlphaMap).is_some() {
                warnings.push(MaterialWarning::AlphaMapWithoutTransparency);
            }
        }
        if let (Some(_), Some(geometry)) = (self.texture(TextureSlot::DisplacementMap), geometry) {
            if geometry.vertex_count() < MIN_DISPLACEMENT_VERTICES {
                warnings.push(MaterialWarning::SparseDisplacementGeometry {
                    vertices: geometry.vertex_count(),
                });
            }
        }
        if let Some(gradient) = self.texture(TextureSlot::GradientMap) {
            if gradient.sampler().is_smooth() {
                warnings.push(MaterialWarning::SmoothGradient);
            }
        }
        self.lint_parameters(&mut warnings);
        warnings
    }

    /// Fail when `geometry` lacks an attribute a bound texture needs.
    fn validate_geometry(&self, geometry: &Geometry) -> Result<(), AssetError> {
        let slots = self.slots();
        if slots.iter().any(|(_, texture)| texture.is_some()) && !geometry.has_attribute(UV) {
            return Err(AssetError::MissingAttribute(UV.to_string()));
        }
        if self.texture(TextureSlot::AoMap).is_some() && !geometry.has_attribute(UV2) {
            return Err(AssetError::MissingAttribute(UV2.to_string()));
        }
        Ok(())
    }
}

/// Physically based material driven by metalness and roughness.
#[derive(Clone, Debug)]
pub struct MeshStandardMaterial {
    pub settings: MaterialSettings,
    pub color: [f32; 3],
    pub map: Option<Texture>,
    pub alpha_map: Option<Texture>,
    pub displacement_map: Option<Texture>,
    pub displacement_scale: f32,
    pub displacement_bias: f32,
    pub normal_map: Option<Texture>,
    normal_scale: Vector2<f32>,
    pub ao_map: Option<Texture>,
    pub ao_map_intensity: f32,
    pub metalness: f32,
    metalness_map: Option<Texture>,
    pub roughness: f32,
    roughness_map: Option<Texture>,
    pub env_map: Option<CubeTexture>,
    pub env_map_intensity: f32,
}

impl Default for MeshStandardMaterial {
    fn default() -> Self {
        Self {
            settings: MaterialSettings::default(),
            color: [1.0, 1.0, 1.0],
            map: None,
            alpha_map: None,
            displacement_map: None,
            displacement_scale: 1.0,
            displacement_bias: 0.0,
            normal_map: None,
            normal_scale: Vector2::new(1.0, 1.0),
            ao_map: None,
            ao_map_intensity: 1.0,
            metalness: 0.0,
            metalness_map: None,
            roughness: 1.0,
            roughness_map: None,
            env_map: None,
            env_map_intensity: 1.0,
        }
    }
}

impl MeshStandardMaterial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_map(mut self, map: Texture) -> Self {
        self.map = Some(map);
        self
    }

    pub fn with_alpha_map(mut self, alpha_map: Texture) -> Self {
        self.alpha_map = Some(alpha_map);
        self
    }

    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.settings.set_transparent(transparent);
        self
    }

    pub fn with_displacement_map(mut self, map: Texture, scale: f32) -> Self {
        self.displacement_map = Some(map);
        self.displacement_scale = scale;
        self
    }

    pub fn with_normal_map(mut self, normal_map: Texture) -> Self {
        self.normal_map = Some(normal_map);
        self
    }

    pub fn with_ao_map(mut self, ao_map: Texture) -> Self {
        self.ao_map = Some(ao_map);
        self
    }

    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness;
        self
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_metalness_map(mut self, map: Texture) -> Self {
        self.set_metalness_map(Some(map));
        self
    }

    pub fn with_roughness_map(mut self, map: Texture) -> Self {
        self.set_roughness_map(Some(map));
        self
    }

    pub fn with_env_map(mut self, env_map: CubeTexture) -> Self {
        self.env_map = Some(env_map);
        self
    }

    pub fn normal_scale(&self) -> Vector2<f32> {
        self.normal_scale
    }

    /// Strength of the normal map per axis, each clamped to `0.0..=1.0`.
    pub fn set_normal_scale(&mut self, x: f32, y: f32) {
        self.normal_scale = clamp_normal_scale(Vector2::new(x, y));
    }

    pub fn metalness_map(&self) -> Option<&Texture> {
        self.metalness_map.as_ref()
    }

    /// Bind a metalness map. The scalar `metalness` multiplies the map, so it
    /// is reset to 1 and the map alone decides.
    pub fn set_metalness_map(&mut self, map: Option<Texture>) {
        if map.is_some() {
            self.metalness = 1.0;
        }
        self.metalness_map = map;
    }

    pub fn roughness_map(&self) -> Option<&Texture> {
        self.roughness_map.as_ref()
    }

    /// Bind a roughness map; `roughness` is reset to 1 like in [`set_metalness_map`](Self::set_metalness_map).
    pub fn set_roughness_map(&mut self, map: Option<Texture>) {
        if map.is_some() {
            self.roughness = 1.0;
        }
        self.roughness_map = map;
    }
}

impl MeshMaterial for MeshStandardMaterial {
    fn settings(&self) -> &MaterialSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut MaterialSettings {
        &mut self.settings
    }

    fn slots(&self) -> Vec<(TextureSlot, Option<&Texture>)> {
        vec![
            (TextureSlot::Map, self.map.as_ref()),
            (TextureSlot::AlphaMap, self.alpha_map.as_ref()),
            (TextureSlot::DisplacementMap, self.displacement_map.as_ref()),
            (TextureSlot::NormalMap, self.normal_map.as_ref()),
            (TextureSlot::AoMap, self.ao_map.as_ref()),
            (TextureSlot::MetalnessMap, self.metalness_map.as_ref()),
            (TextureSlot::RoughnessMap, self.roughness_map.as_ref()),
        ]
    }

    fn env_map(&self) -> Option<&CubeTexture> {
        self.env_map.as_ref()
    }

    fn uniform(&self) -> MaterialUniform {
        let mut uniform = MaterialUniform {
            metalness: self.metalness,
            roughness: self.roughness,
            displacement_scale: self.displacement_scale,
            displacement_bias: self.displacement_bias,
            normal_scale: self.normal_scale.into(),
            ao_map_intensity: self.ao_map_intensity,
            env_map_intensity: self.env_map_intensity,
            ..MaterialUniform::new(self.color, &self.settings)
        }
        .with_slots(self.slots());
        if self.env_map.is_some() {
            uniform.slots |= TextureSlot::EnvMap.bit();
        }
        uniform
    }

    fn lint_parameters(&self, warnings: &mut Vec<MaterialWarning>) {
        if self.metalness_map.is_some() && self.metalness != 1.0 {
            warnings.push(MaterialWarning::MetalnessOverriddenByMap {
                metalness: self.metalness,
            });
        }
        if self.roughness_map.is_some() && self.roughness != 1.0 {
            warnings.push(MaterialWarning::RoughnessOverriddenByMap {
                roughness: self.roughness,
            });
        }
    }
}

/// Lighting baked into a matcap texture; needs no lights in the scene.
#[derive(Clone, Debug)]
pub struct MeshMatcapMaterial {
    pub settings: MaterialSettings,
    pub color: [f32; 3],
    pub matcap: Option<Texture>,
    pub map: Option<Texture>,
    pub alpha_map: Option<Texture>,
    pub normal_map: Option<Texture>,
    normal_scale: Vector2<f32>,
}

impl Default for MeshMatcapMaterial {
    fn default() -> Self {
        Self {
            settings: MaterialSettings::default(),
            color: [1.0, 1.0, 1.0],
            matcap: None,
            map: None,
            alpha_map: None,
            normal_map: None,
            normal_scale: Vector2::new(1.0, 1.0),
        }
    }
}

impl MeshMatcapMaterial {
    pub fn new(matcap: Texture) -> Self {
        Self {
            matcap: Some(matcap),
            ..Default::default()
        }
    }

    pub fn normal_scale(&self) -> Vector2<f32> {
        self.normal_scale
    }

    pub fn set_normal_scale(&mut self, x: f32, y: f32) {
        self.normal_scale = clamp_normal_scale(Vector2::new(x, y));
    }
}

impl MeshMaterial for MeshMatcapMaterial {
    fn settings(&self) -> &MaterialSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut MaterialSettings {
        &mut self.settings
    }

    fn slots(&self) -> Vec<(TextureSlot, Option<&Texture>)> {
        vec![
            (TextureSlot::Matcap, self.matcap.as_ref()),
            (TextureSlot::Map, self.map.as_ref()),
            (TextureSlot::AlphaMap, self.alpha_map.as_ref()),
            (TextureSlot::NormalMap, self.normal_map.as_ref()),
        ]
    }

    fn uniform(&self) -> MaterialUniform {
        MaterialUniform {
            normal_scale: self.normal_scale.into(),
            ..MaterialUniform::new(self.color, &self.settings)
        }
        .with_slots(self.slots())
    }
}

/// Cartoon shading: diffuse light is looked up in a gradient map.
///
/// For hard bands the gradient map should use [`Texture::nearest_filtering`].
#[derive(Clone, Debug)]
pub struct MeshToonMaterial {
    pub settings: MaterialSettings,
    pub color: [f32; 3],
    pub map: Option<Texture>,
    pub gradient_map: Option<Texture>,
    pub alpha_map: Option<Texture>,
    pub normal_map: Option<Texture>,
    normal_scale: Vector2<f32>,
    pub ao_map: Option<Texture>,
    pub ao_map_intensity: f32,
}

impl Default for MeshToonMaterial {
    fn default() -> Self {
        Self {
            settings: MaterialSettings::default(),
            color: [1.0, 1.0, 1.0],
            map: None,
            gradient_map: None,
            alpha_map: None,
            normal_map: None,
            normal_scale: Vector2::new(1.0, 1.0),
            ao_map: None,
            ao_map_intensity: 1.0,
        }
    }
}

impl MeshToonMaterial {
    pub fn new(gradient_map: Texture) -> Self {
        Self {
            gradient_map: Some(gradient_map),
            ..Default::default()
        }
    }

    pub fn normal_scale(&self) -> Vector2<f32> {
        self.normal_scale
    }

    pub fn set_normal_scale(&mut self, x: f32, y: f32) {
        self.normal_scale = clamp_normal_scale(Vector2::new(x, y));
    }
}

impl MeshMaterial for MeshToonMaterial {
    fn settings(&self) -> &MaterialSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut MaterialSettings {
        &mut self.settings
    }

    fn slots(&self) -> Vec<(TextureSlot, Option<&Texture>)> {
        vec![
            (TextureSlot::Map, self.map.as_ref()),
            (TextureSlot::GradientMap, self.gradient_map.as_ref()),
            (TextureSlot::AlphaMap, self.alpha_map.as_ref()),
            (TextureSlot::NormalMap, self.normal_map.as_ref()),
            (TextureSlot::AoMap, self.ao_map.as_ref()),
        ]
    }

    fn uniform(&self) -> MaterialUniform {
        MaterialUniform {
            normal_scale: self.normal_scale.into(),
            ao_map_intensity: self.ao_map_intensity,
            ..MaterialUniform::new(self.color, &self.settings)
        }
        .with_slots(self.slots())
    }
}

/// Any of the supported materials.
#[derive(Clone, Debug)]
pub enum Material {
    Standard(MeshStandardMaterial),
    Matcap(MeshMatcapMaterial),
    Toon(MeshToonMaterial),
}

impl Material {
    fn inner(&self) -> &dyn MeshMaterial {
        match self {
            Material::Standard(m) => m,
            Material::Matcap(m) => m,
            Material::Toon(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn MeshMaterial {
        match self {
            Material::Standard(m) => m,
            Material::Matcap(m) => m,
            Material::Toon(m) => m,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Material::Standard(_) => "standard",
            Material::Matcap(_) => "matcap",
            Material::Toon(_) => "toon",
        }
    }
}

impl MeshMaterial for Material {
    fn settings(&self) -> &MaterialSettings {
        self.inner().settings()
    }

    fn settings_mut(&mut self) -> &mut MaterialSettings {
        self.inner_mut().settings_mut()
    }

    fn slots(&self) -> Vec<(TextureSlot, Option<&Texture>)> {
        self.inner().slots()
    }

    fn env_map(&self) -> Option<&CubeTexture> {
        self.inner().env_map()
    }

    fn uniform(&self) -> MaterialUniform {
        self.inner().uniform()
    }

    fn lint_parameters(&self, warnings: &mut Vec<MaterialWarning>) {
        self.inner().lint_parameters(warnings)
    }
}

impl From<MeshStandardMaterial> for Material {
    fn from(material: MeshStandardMaterial) -> Self {
        Material::Standard(material)
    }
}

impl From<MeshMatcapMaterial> for Material {
    fn from(material: MeshMatcapMaterial) -> Self {
        Material::Matcap(material)
    }
}

impl From<MeshToonMaterial> for Material {
    fn from(material: MeshToonMaterial) -> Self {
        Material::Toon(material)
    }
}
