//! Application shell: plugin composition, lighting, loading gate and camera.

mod camera;
mod state;

pub use camera::*;
pub use state::*;

use avian3d::prelude::{Physics, PhysicsPlugins};
use avian3d::schedule::PhysicsTime;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use vitrine_mono_mat::MonoMaterialPlugin;

use crate::compositor::CompositorPlugin;
use crate::contact::ContactPlugin;
use crate::content::ContentPlugin;
use crate::filter::FilterPlugin;
use crate::gallery::GalleryPlugin;
use crate::noise::NoisePlugin;
use crate::scroll::ScrollPlugin;
use crate::selection::SelectionPlugin;
use crate::title::TitlePlugin;
use crate::ui::UiPlugin;

/// Main plugin that bundles the whole showcase
pub struct ShowcasePlugin;

impl Plugin for ShowcasePlugin {
    fn build(&self, app: &mut App) {
        app
            // Third-party plugins
            .add_plugins(EguiPlugin::default())
            .add_plugins(PhysicsPlugins::default())
            .add_plugins(MonoMaterialPlugin)
            // Shell
            .add_plugins(StageStatePlugin)
            .add_plugins(MainCameraPlugin)
            .add_plugins(ContentPlugin)
            // Scroll + render-to-texture backbone
            .add_plugins(ScrollPlugin)
            .add_plugins(CompositorPlugin)
            .add_plugins(NoisePlugin)
            // Sections
            .add_plugins(FilterPlugin)
            .add_plugins(TitlePlugin)
            .add_plugins(GalleryPlugin)
            .add_plugins(SelectionPlugin)
            .add_plugins(ContactPlugin)
            // UI
            .add_plugins(UiPlugin)
            // Setup
            .add_systems(Startup, (setup_lighting, pause_physics_on_startup));
    }
}

/// Ambient fill plus a key light for the transmissive lens
fn setup_lighting(mut commands: Commands) {
    commands.spawn(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        affects_lightmapped_meshes: true,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 6000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.6, 0.3, 0.0)),
    ));
}

/// Physics simulation stays frozen; only the spatial query structure is used
/// for gallery picking.
fn pause_physics_on_startup(mut physics_time: ResMut<Time<Physics>>) {
    physics_time.set_relative_speed(0.0);
}
