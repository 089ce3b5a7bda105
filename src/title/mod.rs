//! Title spiral
//!
//! 150 copies of the title glyph start stacked at the origin. Once the user
//! scrolls, a damped `spread` value disperses them into a receding spiral;
//! when the track returns to the top they collapse back into a single stack.
//! The controller also rides the whole group upward with the offset and keys
//! the portal backdrop color on it.

use bevy::prelude::*;

use crate::anim::approach;
use crate::compositor::{portal_layer, PortalCamera};
use crate::constants::title;
use crate::scroll::ScrollProgress;
use crate::stage::{RequiredAssets, ShowcaseState};

/// Damped dispersal state. 0 = fully stacked, 1 = fully spiraled.
#[derive(Resource, Debug, Default)]
pub struct SpreadState {
    pub spread: f32,
}

/// Explicit handles to the spiral's entities; copies are addressed by index,
/// never by scene-graph traversal.
#[derive(Resource)]
pub struct TitleRig {
    pub root: Entity,
    pub copies: Vec<Entity>,
}

/// Advance the spread one frame: approach 1 while the track is scrolled,
/// approach 0 at rest, snapping to exactly zero below the epsilon.
pub fn advance_spread(spread: f32, offset: f32, dt: f32) -> f32 {
    let target = if offset > title::SPREAD_THRESHOLD { 1.0 } else { 0.0 };
    let next = approach(spread, target, title::SPREAD_RATE, dt);
    if target == 0.0 && next < title::SPREAD_EPSILON {
        0.0
    } else {
        next
    }
}

/// Fully-dispersed position of copy `index` (spread = 1).
pub fn spiral_target(index: usize) -> Vec3 {
    let angle = index as f32 * title::ANGLE_STEP;
    let radius = index as f32 * title::RADIUS_STEP;
    Vec3::new(
        angle.cos() * radius,
        angle.sin() * radius,
        -(index as f32) * title::DEPTH_STEP,
    )
}

/// Position of copy `index` at the given spread. Copy 0 is the foreground
/// copy: pinned at the origin and pushed slightly toward the camera.
pub fn copy_translation(index: usize, spread: f32) -> Vec3 {
    if index == 0 {
        Vec3::new(0.0, 0.0, title::FRONT_Z + spread * title::FRONT_Z_SPREAD)
    } else {
        spiral_target(index) * spread
    }
}

/// Palette tint for copy `index`, cycling through the fixed palette.
pub fn palette_color(index: usize) -> Color {
    title::PALETTE[index % title::PALETTE.len()]
}

/// Backdrop color keyed on the scroll offset.
pub fn background_color(offset: f32) -> Color {
    let top = title::BACKGROUND_TOP.to_srgba();
    let bottom = title::BACKGROUND_BOTTOM.to_srgba();
    let t = offset.clamp(0.0, 1.0);
    Color::srgb(
        top.red + (bottom.red - top.red) * t,
        top.green + (bottom.green - top.green) * t,
        top.blue + (bottom.blue - top.blue) * t,
    )
}

pub struct TitlePlugin;

impl Plugin for TitlePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpreadState>()
            .add_systems(Startup, spawn_title_spiral)
            .add_systems(
                Update,
                (advance_spread_system, place_title_copies, tint_background)
                    .chain()
                    .run_if(in_state(ShowcaseState::Running)),
            );
    }
}

/// Spawn the stacked copies on the portal layer. One quad mesh and eight
/// palette-tinted materials are shared across the 150 copies.
fn spawn_title_spiral(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut required: ResMut<RequiredAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let glyph: Handle<Image> = asset_server.load(title::IMAGE_PATH);
    required.track(&glyph);

    let quad = meshes.add(Rectangle::new(title::QUAD_SIZE.x, title::QUAD_SIZE.y));
    let tints: Vec<Handle<StandardMaterial>> = (0..title::PALETTE.len())
        .map(|index| {
            materials.add(StandardMaterial {
                base_color: palette_color(index),
                base_color_texture: Some(glyph.clone()),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            })
        })
        .collect();

    let root = commands
        .spawn((Transform::default(), Visibility::default(), portal_layer()))
        .id();

    let copies: Vec<Entity> = (0..title::COPY_COUNT)
        .map(|index| {
            commands
                .spawn((
                    Mesh3d(quad.clone()),
                    MeshMaterial3d(tints[index % tints.len()].clone()),
                    Transform::from_translation(copy_translation(index, 0.0)),
                    portal_layer(),
                    ChildOf(root),
                ))
                .id()
        })
        .collect();

    commands.insert_resource(TitleRig { root, copies });
}

/// Damp the spread toward its scroll-driven target.
fn advance_spread_system(
    time: Res<Time>,
    progress: Res<ScrollProgress>,
    mut spread: ResMut<SpreadState>,
) {
    spread.spread = advance_spread(spread.spread, progress.offset, time.delta_secs());
}

/// Lay the copies out along the spiral and ride the group upward.
fn place_title_copies(
    progress: Res<ScrollProgress>,
    spread: Res<SpreadState>,
    rig: Res<TitleRig>,
    mut transforms: Query<&mut Transform>,
) {
    if let Ok(mut root_transform) = transforms.get_mut(rig.root) {
        root_transform.translation.y = progress.offset * title::RISE_GAIN;
    }
    for (index, copy) in rig.copies.iter().enumerate() {
        if let Ok(mut transform) = transforms.get_mut(*copy) {
            transform.translation = copy_translation(index, spread.spread);
        }
    }
}

/// Lerp the portal clear color between the two backdrop colors.
fn tint_background(
    progress: Res<ScrollProgress>,
    mut camera_query: Query<&mut Camera, With<PortalCamera>>,
) {
    let Ok(mut camera) = camera_query.single_mut() else {
        return;
    };
    camera.clear_color = ClearColorConfig::Custom(background_color(progress.offset));
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn spread_converges_up_while_scrolled() {
        let mut spread = 0.0;
        for _ in 0..1200 {
            spread = advance_spread(spread, 1.0, DT);
        }
        assert!((spread - 1.0).abs() < 1e-3);
    }

    #[test]
    fn spread_converges_down_and_snaps_to_zero_at_rest() {
        let mut spread = 1.0;
        for _ in 0..1200 {
            spread = advance_spread(spread, 0.0, DT);
        }
        assert_eq!(spread, 0.0);
    }

    #[test]
    fn spread_holds_with_zero_dt() {
        assert_eq!(advance_spread(0.5, 1.0, 0.0), 0.5);
    }

    #[test]
    fn copies_collapse_to_the_origin_at_zero_spread() {
        for index in 1..title::COPY_COUNT {
            assert_eq!(copy_translation(index, 0.0), Vec3::ZERO);
        }
        // The foreground copy keeps its resting Z bias
        assert_eq!(copy_translation(0, 0.0), Vec3::new(0.0, 0.0, title::FRONT_Z));
    }

    #[test]
    fn spiral_recedes_and_widens_with_index() {
        let near = spiral_target(10);
        let far = spiral_target(100);
        assert!(far.z < near.z);
        assert!(far.truncate().length() > near.truncate().length());
        // Radius grows linearly with the index
        assert!((spiral_target(50).truncate().length() - 50.0 * title::RADIUS_STEP).abs() < 1e-4);
    }

    #[test]
    fn translation_scales_linearly_with_spread() {
        let full = copy_translation(42, 1.0);
        let half = copy_translation(42, 0.5);
        assert!((half - full * 0.5).length() < 1e-6);
    }

    #[test]
    fn palette_cycles_by_index() {
        assert_eq!(palette_color(0), palette_color(title::PALETTE.len()));
        assert_eq!(palette_color(3), palette_color(3 + 2 * title::PALETTE.len()));
    }

    #[test]
    fn background_lerps_between_the_fixed_colors() {
        assert_eq!(background_color(0.0), title::BACKGROUND_TOP);
        let mid = background_color(0.5).to_srgba();
        let top = title::BACKGROUND_TOP.to_srgba();
        let bottom = title::BACKGROUND_BOTTOM.to_srgba();
        assert!((mid.red - (top.red + bottom.red) * 0.5).abs() < 1e-6);
        // Out-of-domain offsets clamp instead of extrapolating
        assert_eq!(background_color(2.0), background_color(1.0));
    }
}
