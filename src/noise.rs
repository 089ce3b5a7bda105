//! Procedural roughness noise
//!
//! A single tileable sin/cos interference texture generated once at startup
//! and fed to the filter lens as its roughness variation map.

use bevy::asset::RenderAssetUsages;
use bevy::image::{ImageAddressMode, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::constants::noise;

/// Handle to the generated noise texture (memoized for the app lifetime)
#[derive(Resource)]
pub struct NoiseTexture {
    pub handle: Handle<Image>,
}

/// Closed-form noise value for one pixel, in [0, 255].
pub fn noise_value(x: u32, y: u32, frequency: f32) -> u8 {
    let v = ((x as f32 * frequency).sin() * (y as f32 * frequency).cos() + 1.0) * 0.5;
    (v * 255.0) as u8
}

/// Build the tileable grayscale noise image: repeat-wrapped, linear filtered,
/// stored as linear (non-sRGB) data since it feeds a roughness channel.
pub fn generate_noise_image(size: u32, frequency: f32) -> Image {
    let mut data = vec![0u8; (size * size * 4) as usize];
    for y in 0..size {
        for x in 0..size {
            let value = noise_value(x, y, frequency);
            let index = ((y * size + x) * 4) as usize;
            data[index] = value;
            data[index + 1] = value;
            data[index + 2] = value;
            data[index + 3] = 255;
        }
    }

    let mut image = Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8Unorm,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::Repeat,
        address_mode_v: ImageAddressMode::Repeat,
        address_mode_w: ImageAddressMode::Repeat,
        ..ImageSamplerDescriptor::linear()
    });
    image
}

pub struct NoisePlugin;

impl Plugin for NoisePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, generate_noise_texture);
    }
}

/// Generate the texture once and stash the handle.
fn generate_noise_texture(mut commands: Commands, mut images: ResMut<Assets<Image>>) {
    let handle = images.add(generate_noise_image(noise::SIZE, noise::FREQUENCY));
    commands.insert_resource(NoiseTexture { handle });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_matches_the_closed_form() {
        // At the origin sin(0) = 0, so the value sits at mid-gray
        assert_eq!(noise_value(0, 0, 0.1), 127);

        let expected = (((3.0_f32 * 0.1).sin() * (7.0_f32 * 0.1).cos() + 1.0) * 0.5 * 255.0) as u8;
        assert_eq!(noise_value(3, 7, 0.1), expected);
    }

    #[test]
    fn noise_is_deterministic() {
        for (x, y) in [(0, 0), (5, 9), (127, 127)] {
            assert_eq!(noise_value(x, y, 0.1), noise_value(x, y, 0.1));
        }
    }

    #[test]
    fn image_covers_every_pixel_with_opaque_gray() {
        let image = generate_noise_image(8, 0.1);
        let data = image.data.as_ref().expect("cpu-side image data");
        assert_eq!(data.len(), 8 * 8 * 4);
        for pixel in data.chunks(4) {
            assert_eq!(pixel[0], pixel[1]);
            assert_eq!(pixel[1], pixel[2]);
            assert_eq!(pixel[3], 255);
        }
    }
}
