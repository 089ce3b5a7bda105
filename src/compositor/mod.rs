//! Offscreen compositor
//!
//! The title spiral, galleries and contact text live on a dedicated "portal"
//! render layer. A portal camera mirrors the main camera and renders that
//! layer into a persistent color target every frame; a viewport-filling
//! backdrop plane on the main layer displays the result, and the filter lens
//! refracts whatever is drawn behind it — i.e. that plane.
//!
//! Ordering is enforced by construction: the portal camera renders at order
//! -1, the main camera at the default 0, so the target's contents for a frame
//! are always complete before any consumer samples them. This is the single
//! integration point for the producer/consumer relationship — nothing else
//! binds the target.

use bevy::asset::RenderAssetUsages;
use bevy::camera::visibility::RenderLayers;
use bevy::camera::RenderTarget;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages};
use bevy::window::{PrimaryWindow, WindowResized};

use crate::stage::{MainCamera, WorldViewport};

/// Render layer holding the composited sub-scene
pub const PORTAL_LAYER: usize = 1;

/// Backdrop depth: behind the filter lens at every phase so transmission
/// always has the composited image to refract.
const BACKDROP_Z: f32 = -0.3;

/// Layer component for entities that render into the portal target.
pub fn portal_layer() -> RenderLayers {
    RenderLayers::layer(PORTAL_LAYER)
}

/// The offscreen color target. Allocated once; resized in place on window
/// resize; its contents are rewritten every frame by the portal camera.
#[derive(Resource)]
pub struct PortalTarget {
    pub image: Handle<Image>,
}

/// Marker component for the offscreen camera
#[derive(Component)]
pub struct PortalCamera;

/// Marker component for the plane presenting the portal texture
#[derive(Component)]
pub struct Backdrop;

pub struct CompositorPlugin;

impl Plugin for CompositorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_compositor)
            .add_systems(
                Update,
                (sync_portal_camera, fit_backdrop, resize_portal_target),
            );
    }
}

/// Create the render target, the portal camera and the backdrop plane.
fn setup_compositor(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
) {
    let (width, height) = window_query
        .single()
        .map(|w| (w.physical_width().max(1), w.physical_height().max(1)))
        .unwrap_or((1280, 720));

    let mut image = Image::new_fill(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[255, 255, 255, 255],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.texture_descriptor.usage =
        TextureUsages::RENDER_ATTACHMENT | TextureUsages::TEXTURE_BINDING;
    let target = images.add(image);

    // Portal camera: renders the content layer into the target ahead of the
    // main pass (order -1 vs 0).
    commands.spawn((
        PortalCamera,
        Camera3d::default(),
        Camera {
            order: -1,
            clear_color: ClearColorConfig::Custom(Color::WHITE),
            ..default()
        },
        RenderTarget::Image(target.clone().into()),
        Transform::default(),
        portal_layer(),
    ));

    // Backdrop plane: shows the composited texture across the whole viewport.
    commands.spawn((
        Backdrop,
        Mesh3d(meshes.add(Rectangle::new(1.0, 1.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(target.clone()),
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, BACKDROP_Z),
    ));

    commands.insert_resource(PortalTarget { image: target });
}

/// Keep the portal camera glued to the main camera's viewpoint so the
/// composited scene and the presented scene agree.
fn sync_portal_camera(
    main_query: Query<(&Transform, &Projection), (With<MainCamera>, Without<PortalCamera>)>,
    mut portal_query: Query<(&mut Transform, &mut Projection), With<PortalCamera>>,
) {
    let Ok((main_transform, main_projection)) = main_query.single() else {
        return;
    };
    let Ok((mut transform, mut projection)) = portal_query.single_mut() else {
        return;
    };
    *transform = *main_transform;
    *projection = main_projection.clone();
}

/// Stretch the backdrop to exactly fill the frustum at its depth.
fn fit_backdrop(
    viewport: Res<WorldViewport>,
    mut backdrop_query: Query<&mut Transform, With<Backdrop>>,
) {
    let Ok(mut transform) = backdrop_query.single_mut() else {
        return;
    };
    // The viewport is measured at z = 0; the backdrop sits further from the
    // camera, so it needs proportionally more coverage.
    let depth_gain = (crate::constants::camera::POSITION.z - BACKDROP_Z)
        / crate::constants::camera::POSITION.z;
    transform.scale = Vec3::new(
        viewport.size.x * depth_gain,
        viewport.size.y * depth_gain,
        1.0,
    );
}

/// Resize the target in place when the window changes; the handle (and every
/// consumer binding it) stays valid.
fn resize_portal_target(
    mut resized: MessageReader<WindowResized>,
    target: Res<PortalTarget>,
    mut images: ResMut<Assets<Image>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
) {
    if resized.read().last().is_none() {
        return;
    }
    let Ok(window) = window_query.single() else {
        return;
    };
    let Some(image) = images.get_mut(&target.image) else {
        return;
    };
    image.resize(Extent3d {
        width: window.physical_width().max(1),
        height: window.physical_height().max(1),
        depth_or_array_layers: 1,
    });
}
