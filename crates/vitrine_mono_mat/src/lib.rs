use bevy::{
    asset::embedded_asset,
    pbr::{MaterialExtension, MaterialPlugin, StandardMaterial},
    prelude::*,
    render::render_resource::{AsBindGroup, ShaderType},
    shader::ShaderRef,
};

pub use bevy::pbr::ExtendedMaterial;

/// Type alias for the extended desaturation material.
pub type MonoMat = ExtendedMaterial<StandardMaterial, MonoMaterial>;

/// Plugin that registers the [`MonoMaterial`] with Bevy's rendering system.
pub struct MonoMaterialPlugin;

impl Plugin for MonoMaterialPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "mono.wgsl");
        app.add_plugins(MaterialPlugin::<
            ExtendedMaterial<StandardMaterial, MonoMaterial>,
        >::default());
    }
}

/// Uniform data sent to the GPU for the desaturation shader.
#[derive(Clone, Copy, ShaderType, Debug)]
pub struct MonoUniform {
    /// Blend factor toward luminance: 0.0 = full color, 1.0 = grayscale
    pub grayscale: f32,
    pub _padding: Vec3,
}

/// A material that desaturates the base color toward its luminance.
///
/// Extends Bevy's `StandardMaterial` so textured quads can fade between full
/// color and grayscale per instance without swapping textures. The base
/// material's alpha still controls opacity.
#[derive(Asset, AsBindGroup, TypePath, Debug, Clone)]
pub struct MonoMaterial {
    #[uniform(100)]
    pub uniform: MonoUniform,
}

impl MonoMaterial {
    /// Build an extension with the given desaturation factor (clamped in shader).
    pub fn with_grayscale(grayscale: f32) -> Self {
        Self {
            uniform: MonoUniform {
                grayscale,
                _padding: Vec3::ZERO,
            },
        }
    }
}

impl Default for MonoMaterial {
    fn default() -> Self {
        Self::with_grayscale(0.0)
    }
}

impl MaterialExtension for MonoMaterial {
    fn fragment_shader() -> ShaderRef {
        "embedded://vitrine_mono_mat/mono.wgsl".into()
    }

    fn deferred_fragment_shader() -> ShaderRef {
        "embedded://vitrine_mono_mat/mono.wgsl".into()
    }
}
