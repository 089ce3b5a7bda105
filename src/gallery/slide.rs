//! Horizontal template gallery
//!
//! Eight template cards laid out in a row that slides from off-screen right
//! to off-screen left across its scroll range. The card nearest the logical
//! center keeps full color while the rest desaturate on a Gaussian falloff;
//! hovering a card enlarges it slightly. Opacity composes a fade-in over the
//! early progress with a fade-out over the tail.

use avian3d::prelude::Collider;
use bevy::prelude::*;
use vitrine_mono_mat::{MonoMat, MonoMaterial};

use super::GalleryItem;
use crate::anim::{approach, fade_window, gaussian_weight, ramp};
use crate::compositor::portal_layer;
use crate::constants::slide;
use crate::content::{ContentLibrary, GalleryKind};
use crate::scroll::ScrollProgress;
use crate::stage::{RequiredAssets, ShowcaseState};

/// Entity handles for the slide gallery plus the currently hovered index.
#[derive(Resource)]
pub struct SlideRig {
    pub root: Entity,
    pub items: Vec<Entity>,
    pub hovered: Option<usize>,
}

/// Damped per-card state (desaturation and hover scale memory).
#[derive(Component, Debug)]
pub struct SlideItemState {
    pub desaturation: f32,
    pub scale: f32,
}

impl Default for SlideItemState {
    fn default() -> Self {
        Self { desaturation: 1.0, scale: 1.0 }
    }
}

/// Progress through the slide's scroll range.
pub fn slide_progress(offset: f32) -> f32 {
    ramp(offset, slide::START_OFFSET, slide::END_OFFSET)
}

/// Resting X of card `index` within the row.
pub fn item_base_x(index: usize) -> f32 {
    index as f32 * (slide::ITEM_SCALE.x + slide::GAP)
}

/// Total width the row occupies.
pub fn row_width(count: usize) -> f32 {
    count as f32 * (slide::ITEM_SCALE.x + slide::GAP)
}

/// Group X for the current progress: starts past the right edge, ends with
/// the whole row off the left edge.
pub fn group_x(progress: f32, total_width: f32) -> f32 {
    slide::START_X - progress * (total_width + slide::EXTRA_TRAVEL)
}

/// Shared group opacity: min of the fade-in and fade-out ramps.
pub fn group_opacity(progress: f32) -> f32 {
    fade_window(
        progress,
        slide::FADE_IN_GAIN,
        slide::FADE_OUT_START,
        slide::FADE_OUT_GAIN,
    )
}

/// Desaturation target for card `index`: 0 in focus, 1 far from it.
pub fn desaturation_target(index: usize, count: usize, progress: f32) -> f32 {
    (1.0 - gaussian_weight(index, count, progress, slide::FOCUS_SHARPNESS)).clamp(0.0, 1.0)
}

/// The row renders only inside its scroll range.
pub fn row_visible(offset: f32) -> bool {
    (slide::START_OFFSET..=slide::END_OFFSET).contains(&offset)
}

pub struct SlideGalleryPlugin;

impl Plugin for SlideGalleryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_slide_gallery).add_systems(
            Update,
            apply_slide_layout.run_if(in_state(ShowcaseState::Running)),
        );
    }
}

/// Spawn the row of template cards on the portal layer.
fn spawn_slide_gallery(
    mut commands: Commands,
    content: Res<ContentLibrary>,
    asset_server: Res<AssetServer>,
    mut required: ResMut<RequiredAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<MonoMat>>,
) {
    let quad = meshes.add(Rectangle::new(slide::ITEM_SCALE.x, slide::ITEM_SCALE.y));

    let root = commands
        .spawn((
            Transform::from_xyz(slide::START_X, 0.0, slide::DEPTH),
            Visibility::Hidden,
            portal_layer(),
        ))
        .id();

    let items: Vec<Entity> = content
        .templates
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let image: Handle<Image> = asset_server.load(entry.image.clone());
            required.track(&image);
            commands
                .spawn((
                    GalleryItem {
                        kind: GalleryKind::Templates,
                        id: entry.id,
                        index,
                    },
                    SlideItemState::default(),
                    Mesh3d(quad.clone()),
                    MeshMaterial3d(materials.add(MonoMat {
                        base: StandardMaterial {
                            base_color: Color::WHITE.with_alpha(0.0),
                            base_color_texture: Some(image),
                            alpha_mode: AlphaMode::Blend,
                            unlit: true,
                            ..default()
                        },
                        extension: MonoMaterial::with_grayscale(1.0),
                    })),
                    Transform::from_xyz(item_base_x(index), 0.0, 0.0),
                    Collider::cuboid(slide::ITEM_SCALE.x, slide::ITEM_SCALE.y, 0.02),
                    portal_layer(),
                    ChildOf(root),
                ))
                .id()
        })
        .collect();

    commands.insert_resource(SlideRig { root, items, hovered: None });
}

/// Drive the row position, per-card focus desaturation, hover scale and the
/// composed group opacity from the scroll offset.
fn apply_slide_layout(
    time: Res<Time>,
    progress: Res<ScrollProgress>,
    rig: Res<SlideRig>,
    mut visibility_query: Query<&mut Visibility>,
    mut transforms: Query<&mut Transform>,
    mut item_query: Query<(
        &GalleryItem,
        &mut SlideItemState,
        &MeshMaterial3d<MonoMat>,
    )>,
    mut materials: ResMut<Assets<MonoMat>>,
) {
    let dt = time.delta_secs();
    let t = slide_progress(progress.offset);
    let count = rig.items.len();
    let opacity = group_opacity(t);

    if let Ok(mut visibility) = visibility_query.get_mut(rig.root) {
        *visibility = if row_visible(progress.offset) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    if let Ok(mut root_transform) = transforms.get_mut(rig.root) {
        root_transform.translation.x = group_x(t, row_width(count));
    }

    for (index, item) in rig.items.iter().enumerate() {
        let Ok((_, mut state, material_handle)) = item_query.get_mut(*item) else {
            continue;
        };

        state.desaturation = approach(
            state.desaturation,
            desaturation_target(index, count, t),
            1.0 / slide::FOCUS_SMOOTHING,
            dt,
        );
        let hover_target = if rig.hovered == Some(index) {
            slide::HOVER_SCALE
        } else {
            1.0
        };
        state.scale = approach(state.scale, hover_target, slide::HOVER_RATE, dt);

        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.extension.uniform.grayscale = state.desaturation;
            material.base.base_color.set_alpha(opacity);
        }
        if let Ok(mut transform) = transforms.get_mut(*item) {
            transform.scale = Vec3::new(state.scale, state.scale, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_starts_past_the_right_edge_and_exits_left() {
        let width = row_width(8);
        assert_eq!(group_x(0.0, width), slide::START_X);
        let end = group_x(1.0, width);
        // The last card's right edge ends left of the viewport
        assert!(end + item_base_x(7) + slide::ITEM_SCALE.x * 0.5 < -slide::START_X);
    }

    #[test]
    fn cards_are_evenly_spaced() {
        let spacing = item_base_x(1) - item_base_x(0);
        assert!((spacing - (slide::ITEM_SCALE.x + slide::GAP)).abs() < 1e-6);
        assert!((row_width(8) - 8.0 * spacing).abs() < 1e-6);
    }

    #[test]
    fn center_card_keeps_full_color_at_mid_progress() {
        // N=8 at progress 0.5: card 4 is the focus
        let targets: Vec<f32> = (0..8).map(|i| desaturation_target(i, 8, 0.5)).collect();
        let min_index = targets
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(min_index, 4);
        assert!(targets[4] < 1e-6);
        assert!(targets[0] > 0.9);
    }

    #[test]
    fn opacity_composes_both_ramps() {
        assert_eq!(group_opacity(0.0), 0.0);
        assert_eq!(group_opacity(0.5), 1.0);
        assert!(group_opacity(0.15) < 1.0);
        assert!(group_opacity(0.9) < 1.0);
        assert!(group_opacity(0.9) > 0.0);
    }

    #[test]
    fn row_visibility_is_bounded_by_the_scroll_range() {
        assert!(!row_visible(0.64));
        assert!(row_visible(0.65));
        assert!(row_visible(0.75));
        assert!(row_visible(0.85));
        assert!(!row_visible(0.86));
    }

    #[test]
    fn hover_scale_converges_on_the_enlarged_size() {
        let mut scale = 1.0;
        for _ in 0..600 {
            scale = approach(scale, slide::HOVER_SCALE, slide::HOVER_RATE, 1.0 / 60.0);
        }
        assert!((scale - slide::HOVER_SCALE).abs() < 1e-3);
    }

    #[test]
    fn slide_progress_clamps_outside_the_range() {
        assert_eq!(slide_progress(0.0), 0.0);
        assert_eq!(slide_progress(0.75), 0.5);
        assert_eq!(slide_progress(1.0), 1.0);
    }
}
