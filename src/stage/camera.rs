//! Main camera and world-space viewport helper

use bevy::prelude::*;
use bevy::render::view::Hdr;
use bevy::window::PrimaryWindow;

use crate::constants::camera;

/// Marker component for the presenting camera
#[derive(Component)]
pub struct MainCamera;

/// World-space extents of the view frustum at the content plane (z = 0),
/// recomputed each frame so layout follows window resizes.
#[derive(Debug, Clone, Copy, Resource)]
pub struct WorldViewport {
    pub size: Vec2,
}

impl Default for WorldViewport {
    fn default() -> Self {
        Self {
            size: world_viewport(camera::FOV_DEGREES.to_radians(), 16.0 / 9.0, camera::POSITION.z),
        }
    }
}

/// Height/width of the frustum cross-section at `distance` in front of a
/// perspective camera with vertical `fov` (radians).
pub fn world_viewport(fov: f32, aspect: f32, distance: f32) -> Vec2 {
    let height = 2.0 * distance * (fov * 0.5).tan();
    Vec2::new(height * aspect, height)
}

pub struct MainCameraPlugin;

impl Plugin for MainCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldViewport>()
            .add_systems(Startup, spawn_main_camera)
            .add_systems(Update, update_world_viewport);
    }
}

fn spawn_main_camera(mut commands: Commands) {
    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Hdr,
        Projection::Perspective(PerspectiveProjection {
            fov: camera::FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(camera::POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Track the window aspect so world-space layout stays responsive.
fn update_world_viewport(
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<&Projection, With<MainCamera>>,
    mut viewport: ResMut<WorldViewport>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let Ok(Projection::Perspective(perspective)) = camera_query.single() else {
        return;
    };
    let aspect = window.width().max(1.0) / window.height().max(1.0);
    viewport.size = world_viewport(perspective.fov, aspect, camera::POSITION.z);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_matches_the_telephoto_setup() {
        // fov 5 degrees at distance 5: a narrow slice under half a unit tall
        let size = world_viewport(5.0_f32.to_radians(), 16.0 / 9.0, 5.0);
        assert!((size.y - 0.4366).abs() < 1e-3);
        assert!((size.x - size.y * 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn viewport_scales_linearly_with_distance() {
        let near = world_viewport(1.0, 1.0, 1.0);
        let far = world_viewport(1.0, 1.0, 2.0);
        assert!((far.y - near.y * 2.0).abs() < 1e-6);
    }
}
