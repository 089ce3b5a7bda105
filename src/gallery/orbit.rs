//! Orbital project gallery
//!
//! Eight project cards distributed around a circle. Three sequential
//! sub-phases gate on the scroll range: the ring opens outward from the
//! center, gains an extra rotation once fully open, then the whole orbit
//! expands away. Cards fade in with a per-index delay.

use avian3d::prelude::Collider;
use bevy::prelude::*;

use super::GalleryItem;
use crate::compositor::portal_layer;
use crate::constants::orbit;
use crate::content::{ContentLibrary, GalleryKind};
use crate::phase::{PhaseRange, PhaseTrack};
use crate::scroll::ScrollProgress;
use crate::stage::{RequiredAssets, ShowcaseState};

/// Progress of the three orbital sub-phases at one scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPhases {
    /// Items move outward from the center
    pub open: f32,
    /// Additional angular offset once fully open
    pub rotate: f32,
    /// Orbit radius multiplies outward once rotation completes
    pub expand: f32,
}

/// Entity handles for the orbit gallery, addressed by index.
#[derive(Resource)]
pub struct OrbitRig {
    pub root: Entity,
    pub items: Vec<Entity>,
}

/// The orbit's phase track: open, rotate, expand over contiguous ranges.
pub fn orbit_track() -> PhaseTrack {
    PhaseTrack::new(vec![
        PhaseRange::new(orbit::START_OFFSET, orbit::FULL_OFFSET),
        PhaseRange::new(orbit::FULL_OFFSET, orbit::ROTATE_END_OFFSET),
        PhaseRange::new(orbit::ROTATE_END_OFFSET, orbit::EXPAND_END_OFFSET),
    ])
}

/// The track, built once; per-frame sampling allocates nothing.
#[derive(Resource)]
pub struct OrbitTrack(pub PhaseTrack);

impl Default for OrbitTrack {
    fn default() -> Self {
        Self(orbit_track())
    }
}

/// Sample the three sequential sub-phases. Each one only engages once the
/// previous has completed its range.
pub fn orbit_phases(track: &PhaseTrack, offset: f32) -> OrbitPhases {
    OrbitPhases {
        open: track.progress_through(offset, 0),
        rotate: track.progress_through(offset, 1),
        expand: track.progress_through(offset, 2),
    }
}

/// Base ring angle for item `index` of `count`.
pub fn base_angle(index: usize, count: usize) -> f32 {
    index as f32 / count.max(1) as f32 * std::f32::consts::TAU
}

/// Card position on the opening/rotating/expanding ring.
pub fn item_translation(base_angle: f32, phases: OrbitPhases) -> Vec3 {
    let angle = base_angle + phases.open * orbit::OPEN_TWIST + phases.rotate * orbit::ROTATE_SWEEP;
    let radius = orbit::RADIUS * (1.0 + phases.expand * orbit::EXPAND_GAIN);
    Vec3::new(
        angle.cos() * radius * phases.open,
        angle.sin() * radius * phases.open,
        0.0,
    )
}

/// Per-card fade-in: delayed by index, clamped to [0, 1].
pub fn item_opacity(index: usize, open: f32) -> f32 {
    ((open - index as f32 * orbit::FADE_DELAY) * orbit::FADE_GAIN).clamp(0.0, 1.0)
}

/// The whole ring renders only inside its scroll range, and only once the
/// opening has visibly begun.
pub fn ring_visible(offset: f32, phases: OrbitPhases) -> bool {
    offset >= orbit::START_OFFSET
        && offset <= orbit::EXPAND_END_OFFSET
        && phases.open > orbit::VISIBILITY_FLOOR
}

pub struct OrbitGalleryPlugin;

impl Plugin for OrbitGalleryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitTrack>()
            .add_systems(Startup, spawn_orbit_gallery)
            .add_systems(
                Update,
                apply_orbit_layout.run_if(in_state(ShowcaseState::Running)),
            );
    }
}

/// Spawn the ring of project cards on the portal layer.
fn spawn_orbit_gallery(
    mut commands: Commands,
    content: Res<ContentLibrary>,
    asset_server: Res<AssetServer>,
    mut required: ResMut<RequiredAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let quad = meshes.add(Rectangle::new(orbit::ITEM_SCALE.x, orbit::ITEM_SCALE.y));

    let root = commands
        .spawn((Transform::default(), Visibility::Hidden, portal_layer()))
        .id();

    let items: Vec<Entity> = content
        .projects
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let image: Handle<Image> = asset_server.load(entry.image.clone());
            required.track(&image);
            commands
                .spawn((
                    GalleryItem {
                        kind: GalleryKind::Projects,
                        id: entry.id,
                        index,
                    },
                    Mesh3d(quad.clone()),
                    MeshMaterial3d(materials.add(StandardMaterial {
                        base_color: Color::WHITE.with_alpha(0.0),
                        base_color_texture: Some(image),
                        alpha_mode: AlphaMode::Blend,
                        unlit: true,
                        ..default()
                    })),
                    Transform::default(),
                    Collider::cuboid(orbit::ITEM_SCALE.x, orbit::ITEM_SCALE.y, 0.02),
                    portal_layer(),
                    ChildOf(root),
                ))
                .id()
        })
        .collect();

    commands.insert_resource(OrbitRig { root, items });
}

/// Drive ring visibility, card positions and fades from the scroll offset.
fn apply_orbit_layout(
    progress: Res<ScrollProgress>,
    track: Res<OrbitTrack>,
    rig: Res<OrbitRig>,
    mut visibility_query: Query<&mut Visibility>,
    mut item_query: Query<(&mut Transform, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let phases = orbit_phases(&track.0, progress.offset);

    if let Ok(mut visibility) = visibility_query.get_mut(rig.root) {
        *visibility = if ring_visible(progress.offset, phases) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    let count = rig.items.len();
    for (index, item) in rig.items.iter().enumerate() {
        let Ok((mut transform, material_handle)) = item_query.get_mut(*item) else {
            continue;
        };
        transform.translation = item_translation(base_angle(index, count), phases);
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.base_color.set_alpha(item_opacity(index, phases.open));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phases_at(offset: f32) -> OrbitPhases {
        orbit_phases(&orbit_track(), offset)
    }

    #[test]
    fn phases_engage_in_sequence() {
        let before = phases_at(0.3);
        assert_eq!((before.open, before.rotate, before.expand), (0.0, 0.0, 0.0));

        let opening = phases_at(0.385);
        assert!(opening.open > 0.0 && opening.open < 1.0);
        assert_eq!(opening.rotate, 0.0);

        let rotating = phases_at(0.47);
        assert_eq!(rotating.open, 1.0);
        assert!(rotating.rotate > 0.0 && rotating.rotate < 1.0);
        assert_eq!(rotating.expand, 0.0);

        let expanding = phases_at(0.57);
        assert_eq!((expanding.open, expanding.rotate), (1.0, 1.0));
        assert!(expanding.expand > 0.0 && expanding.expand < 1.0);
    }

    #[test]
    fn closed_ring_collapses_to_the_center() {
        let phases = phases_at(orbit::START_OFFSET);
        for index in 0..8 {
            assert_eq!(item_translation(base_angle(index, 8), phases), Vec3::ZERO);
        }
    }

    #[test]
    fn open_ring_sits_on_the_base_radius() {
        let phases = phases_at(orbit::FULL_OFFSET);
        let translation = item_translation(base_angle(2, 8), phases);
        assert!((translation.truncate().length() - orbit::RADIUS).abs() < 1e-5);
    }

    #[test]
    fn expansion_multiplies_the_radius() {
        let phases = phases_at(orbit::EXPAND_END_OFFSET);
        let translation = item_translation(base_angle(0, 8), phases);
        let expected = orbit::RADIUS * (1.0 + orbit::EXPAND_GAIN);
        assert!((translation.truncate().length() - expected).abs() < 1e-4);
    }

    #[test]
    fn rotation_sweeps_the_ring() {
        let open = phases_at(orbit::FULL_OFFSET);
        let rotated = phases_at(orbit::ROTATE_END_OFFSET);
        let a = item_translation(0.0, open);
        let b = item_translation(0.0, rotated);
        let swept = a.truncate().angle_to(b.truncate());
        assert!((swept.abs() - orbit::ROTATE_SWEEP).abs() < 1e-4);
    }

    #[test]
    fn cards_fade_in_by_index_order() {
        let open = 0.3;
        assert!(item_opacity(0, open) > item_opacity(4, open));
        assert!(item_opacity(4, open) > item_opacity(7, open));
        assert_eq!(item_opacity(0, 1.0), 1.0);
        assert_eq!(item_opacity(7, 0.0), 0.0);
    }

    #[test]
    fn ring_is_hidden_outside_its_range() {
        for offset in [0.0, 0.34, 0.63, 1.0] {
            assert!(!ring_visible(offset, phases_at(offset)), "offset {offset}");
        }
        assert!(ring_visible(0.42, phases_at(0.42)));
        // Barely opened: still hidden behind the visibility floor
        let barely = orbit::START_OFFSET + 0.001;
        assert!(!ring_visible(barely, phases_at(barely)));
    }
}
