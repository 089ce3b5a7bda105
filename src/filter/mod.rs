//! Filter lens
//!
//! A glass lens floats in front of the backdrop plane and refracts the
//! composited content behind it. Scroll drives its pose through four phases:
//!
//! - `Contract` (0 .. 0.4): shrink from the base scale while tumbling on all
//!   three axes.
//! - `Hold` (0.4 .. 0.58): rest at the minimum scale; identical to Contract's
//!   terminal pose so the hand-off is invisible.
//! - `Rectify` (0.58 .. 0.60, held to 0.8): X and Y diverge, flattening the
//!   lens into a bar while it swings to face the camera.
//! - `Expand` (0.8 .. 1.0): the bar grows until it fills the frame.
//!
//! The pose is a pure map from (offset, elapsed time); scrolling backwards
//! replays it exactly. Roughness/metalness breathing runs on elapsed time
//! only and never feeds back into the pose math.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;

use crate::constants::filter;
use crate::noise::NoiseTexture;
use crate::phase::{PhaseRange, PhaseTrack};
use crate::scroll::ScrollProgress;
use crate::stage::{RequiredAssets, ShowcaseState};

/// Marker component for the lens mesh
#[derive(Component)]
pub struct FilterLens;

/// Scroll-derived pose for the lens. Euler angles in XYZ order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterPose {
    pub scale: Vec3,
    pub rotation: Vec3,
    pub position: Vec3,
}

/// The lens phase track: contract, rectify, expand. Gaps hold terminal poses.
pub fn filter_track() -> PhaseTrack {
    PhaseTrack::new(vec![
        PhaseRange::new(0.0, filter::PHASE1_END),
        PhaseRange::new(filter::PHASE2_START, filter::PHASE2_END),
        PhaseRange::new(filter::PHASE3_START, filter::PHASE3_END),
    ])
}

/// The track, built once; per-frame sampling allocates nothing.
#[derive(Resource)]
pub struct FilterTrack(pub PhaseTrack);

impl Default for FilterTrack {
    fn default() -> Self {
        Self(filter_track())
    }
}

fn contract_pose(t: f32, time: f32) -> FilterPose {
    let scale = filter::BASE_SCALE - (filter::BASE_SCALE - filter::MIN_SCALE) * t;
    FilterPose {
        scale: Vec3::splat(scale),
        rotation: Vec3::new(
            t * PI + time.sin() * filter::JITTER_CONTRACT,
            t * FRAC_PI_2,
            t * FRAC_PI_2,
        ),
        position: Vec3::ZERO,
    }
}

fn rectify_pose(t: f32, time: f32) -> FilterPose {
    // Jitter amplitude ramps down so the pose is continuous at both ends.
    let jitter = filter::JITTER_CONTRACT + (filter::JITTER_RECTIFY - filter::JITTER_CONTRACT) * t;
    FilterPose {
        scale: Vec3::new(
            filter::MIN_SCALE + t * filter::RECTIFY_GAIN_X,
            filter::MIN_SCALE + t * filter::RECTIFY_GAIN_Y,
            filter::MIN_SCALE,
        ),
        rotation: Vec3::new(
            PI + time.sin() * jitter,
            FRAC_PI_2 - t * FRAC_PI_2,
            FRAC_PI_2,
        ),
        position: Vec3::ZERO,
    }
}

fn expand_pose(t: f32, time: f32) -> FilterPose {
    // Starts exactly from Rectify's terminal scale.
    let from_x = filter::MIN_SCALE + filter::RECTIFY_GAIN_X;
    let from_y = filter::MIN_SCALE + filter::RECTIFY_GAIN_Y;
    let jitter = filter::JITTER_RECTIFY * (1.0 - t);
    FilterPose {
        scale: Vec3::new(
            from_x + (filter::EXPAND_TARGET_X - from_x) * t,
            from_y + (filter::EXPAND_TARGET_Y - from_y) * t,
            filter::MIN_SCALE + t * filter::EXPAND_GAIN_Z,
        ),
        rotation: Vec3::new(PI + time.sin() * jitter, 0.0, FRAC_PI_2),
        position: Vec3::ZERO,
    }
}

/// The lens pose for a scroll offset and elapsed time. Pure and idempotent:
/// the hold between phases reuses the previous phase's terminal parameters,
/// so scrubbing the track in either direction never pops.
pub fn filter_pose(track: &PhaseTrack, offset: f32, time: f32) -> FilterPose {
    let sample = track.sample(offset);
    match sample.index {
        0 => contract_pose(sample.local_t, time),
        1 => rectify_pose(sample.local_t, time),
        _ => expand_pose(sample.local_t, time),
    }
}

/// Cosmetic material breathing: roughness and metalness oscillate around
/// fixed means on independent sine/cosine clocks.
pub fn breathing(time: f32) -> (f32, f32) {
    let roughness = filter::ROUGHNESS_MEAN + (time * filter::ROUGHNESS_RATE).sin() * filter::ROUGHNESS_AMP;
    let metalness = filter::METALNESS_MEAN + (time * filter::METALNESS_RATE).cos() * filter::METALNESS_AMP;
    (roughness, metalness)
}

pub struct FilterPlugin;

impl Plugin for FilterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FilterTrack>()
            .add_systems(Startup, spawn_filter_lens)
            .add_systems(
                Update,
                (apply_filter_pose, breathe_filter_material)
                    .run_if(in_state(ShowcaseState::Running)),
            );
    }
}

/// Load the lens geometry and give it the transmissive glass material with
/// the procedural noise as its roughness variation map.
fn spawn_filter_lens(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    noise: Res<NoiseTexture>,
    mut required: ResMut<RequiredAssets>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh: Handle<Mesh> = asset_server.load(
        GltfAssetLabel::Primitive { mesh: 0, primitive: 0 }.from_asset(filter::MESH_PATH),
    );
    required.track(&mesh);

    commands.spawn((
        FilterLens,
        Mesh3d(mesh),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            specular_transmission: filter::TRANSMISSION,
            ior: filter::IOR,
            thickness: filter::THICKNESS,
            perceptual_roughness: filter::BASE_ROUGHNESS,
            metallic: filter::BASE_METALNESS,
            metallic_roughness_texture: Some(noise.handle.clone()),
            ..default()
        })),
        Transform::from_scale(Vec3::splat(filter::BASE_SCALE)),
    ));
}

/// Drive the lens transform from the scroll offset.
fn apply_filter_pose(
    progress: Res<ScrollProgress>,
    time: Res<Time>,
    track: Res<FilterTrack>,
    mut lens_query: Query<&mut Transform, With<FilterLens>>,
) {
    let Ok(mut transform) = lens_query.single_mut() else {
        return;
    };
    let pose = filter_pose(&track.0, progress.offset, time.elapsed_secs());
    transform.scale = pose.scale;
    transform.rotation = Quat::from_euler(
        EulerRot::XYZ,
        pose.rotation.x,
        pose.rotation.y,
        pose.rotation.z,
    );
    transform.translation = pose.position;
}

/// Time-only material breathing, independent of scroll.
fn breathe_filter_material(
    time: Res<Time>,
    lens_query: Query<&MeshMaterial3d<StandardMaterial>, With<FilterLens>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Ok(material_handle) = lens_query.single() else {
        return;
    };
    let Some(material) = materials.get_mut(&material_handle.0) else {
        return;
    };
    let (roughness, metalness) = breathing(time.elapsed_secs());
    material.perceptual_roughness = roughness;
    material.metallic = metalness;
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn pose(offset: f32, time: f32) -> FilterPose {
        filter_pose(&filter_track(), offset, time)
    }

    fn assert_pose_close(a: FilterPose, b: FilterPose, tolerance: f32) {
        assert!((a.scale - b.scale).length() < tolerance, "{a:?} vs {b:?}");
        assert!((a.rotation - b.rotation).length() < tolerance, "{a:?} vs {b:?}");
        assert!((a.position - b.position).length() < tolerance, "{a:?} vs {b:?}");
    }

    #[test]
    fn top_of_track_is_the_base_pose() {
        let pose = pose(0.0, 0.0);
        assert_eq!(pose.scale, Vec3::splat(filter::BASE_SCALE));
        assert_eq!(pose.rotation, Vec3::ZERO);
        assert_eq!(pose.position, Vec3::ZERO);
    }

    #[test]
    fn contract_ends_at_the_minimum_scale() {
        let pose = pose(filter::PHASE1_END, 0.0);
        assert!((pose.scale - Vec3::splat(filter::MIN_SCALE)).length() < EPS);
        assert!((pose.rotation.x - PI).abs() < EPS);
        assert!((pose.rotation.y - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn mid_rectify_is_anisotropic_with_x_over_y() {
        let pose = pose(0.6, 0.0);
        assert!(pose.scale.x > pose.scale.y);
        assert!(pose.scale.y > pose.scale.z);
        assert!((pose.scale.x - 0.19).abs() < EPS);
        assert!((pose.scale.y - 0.12).abs() < EPS);
    }

    #[test]
    fn pose_is_idempotent_in_offset_and_time() {
        for offset in [0.0, 0.3, 0.45, 0.59, 0.7, 0.9] {
            assert_eq!(pose(offset, 1.25), pose(offset, 1.25));
        }
    }

    #[test]
    fn hold_matches_contract_terminal_pose() {
        let time = 2.0;
        assert_pose_close(pose(filter::PHASE1_END, time), pose(0.5, time), EPS);
    }

    #[test]
    fn pose_is_continuous_at_every_phase_boundary() {
        let time = 3.7;
        for boundary in [
            filter::PHASE1_END,
            filter::PHASE2_START,
            filter::PHASE2_END,
            filter::PHASE3_START,
        ] {
            let eps = 1e-4;
            assert_pose_close(pose(boundary - eps, time), pose(boundary + eps, time), 1e-2);
        }
    }

    #[test]
    fn expand_starts_from_rectify_terminal_scale() {
        let held = pose(0.7, 0.0);
        let expand_start = pose(filter::PHASE3_START, 0.0);
        assert_pose_close(held, expand_start, EPS);
        assert!((expand_start.scale.x - (filter::MIN_SCALE + filter::RECTIFY_GAIN_X)).abs() < EPS);
    }

    #[test]
    fn full_expand_fills_the_frame() {
        let pose = pose(1.0, 0.0);
        assert!((pose.scale.x - filter::EXPAND_TARGET_X).abs() < EPS);
        assert!((pose.scale.y - filter::EXPAND_TARGET_Y).abs() < EPS);
        assert!((pose.rotation.x - PI).abs() < EPS);
        assert_eq!(pose.rotation.y, 0.0);
    }

    #[test]
    fn out_of_domain_offsets_degrade_to_boundary_poses() {
        assert_eq!(pose(f32::NAN, 0.0), pose(0.0, 0.0));
        assert_eq!(pose(2.0, 0.0), pose(1.0, 0.0));
        assert_eq!(pose(-1.0, 0.0), pose(0.0, 0.0));
    }

    #[test]
    fn breathing_stays_inside_its_envelope() {
        let mut t = 0.0;
        while t < 10.0 {
            let (roughness, metalness) = breathing(t);
            assert!(roughness >= filter::ROUGHNESS_MEAN - filter::ROUGHNESS_AMP - EPS);
            assert!(roughness <= filter::ROUGHNESS_MEAN + filter::ROUGHNESS_AMP + EPS);
            assert!(metalness >= filter::METALNESS_MEAN - filter::METALNESS_AMP - EPS);
            assert!(metalness <= filter::METALNESS_MEAN + filter::METALNESS_AMP + EPS);
            t += 0.1;
        }
    }
}
