//! Galleries
//!
//! Two layout strategies over the same item shape: projects orbit outward
//! from the center (`orbit`), templates slide across the viewport (`slide`).
//! Both live on the portal layer, own their items as explicit entity arrays,
//! and route clicks into the selection store through the picking systems
//! below.

pub mod orbit;
pub mod slide;

pub use orbit::*;
pub use slide::*;

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, SystemCursorIcon};
use bevy::winit::cursor::CursorIcon;
use bevy_egui::EguiContexts;

use crate::content::GalleryKind;
use crate::selection::OpenSelectionEvent;
use crate::stage::{MainCamera, ShowcaseState};

/// One clickable gallery item. `index` is the item's slot in its rig's entity
/// array; `id` is the content id reported to the selection store.
#[derive(Component, Debug, Clone, Copy)]
pub struct GalleryItem {
    pub kind: GalleryKind,
    pub id: u32,
    pub index: usize,
}

pub struct GalleryPlugin;

impl Plugin for GalleryPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(OrbitGalleryPlugin)
            .add_plugins(SlideGalleryPlugin)
            .add_systems(
                Update,
                (hover_gallery_items, click_gallery_items)
                    .run_if(in_state(ShowcaseState::Running)),
            );
    }
}

/// Ray from the presenting camera through the cursor. The portal camera
/// mirrors the main camera exactly, so this ray is valid for portal content.
fn cursor_ray(
    window: &Window,
    camera: &Camera,
    camera_transform: &GlobalTransform,
) -> Option<Ray3d> {
    let cursor_position = window.cursor_position()?;
    camera.viewport_to_world(camera_transform, cursor_position).ok()
}

/// Raycast the cursor against gallery item colliders; returns the item whose
/// gallery is currently visible, if any.
fn pick_gallery_item(
    window: &Window,
    camera: &Camera,
    camera_transform: &GlobalTransform,
    spatial_query: &SpatialQuery,
    items: &Query<&GalleryItem>,
    orbit: &OrbitRig,
    slide: &SlideRig,
    visibility: &Query<&Visibility>,
) -> Option<GalleryItem> {
    let ray = cursor_ray(window, camera, camera_transform)?;
    let hit = spatial_query.cast_ray(
        ray.origin,
        ray.direction,
        100.0,
        true,
        &SpatialQueryFilter::default(),
    )?;
    let item = items.get(hit.entity).ok().copied()?;

    // Hidden galleries must not swallow clicks.
    let root = match item.kind {
        GalleryKind::Projects => orbit.root,
        GalleryKind::Templates => slide.root,
    };
    match visibility.get(root) {
        Ok(Visibility::Hidden) | Err(_) => None,
        Ok(_) => Some(item),
    }
}

/// Track the hovered item: pointer cursor over any clickable item, and the
/// slide gallery remembers which of its items to enlarge.
fn hover_gallery_items(
    window_query: Query<(Entity, &Window), With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    spatial_query: SpatialQuery,
    items: Query<&GalleryItem>,
    orbit: Res<OrbitRig>,
    mut slide: ResMut<SlideRig>,
    visibility: Query<&Visibility>,
    mut contexts: EguiContexts,
    mut commands: Commands,
) {
    let Ok((window_entity, window)) = window_query.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    // The form and modals own the pointer while it is over them.
    let over_ui = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
        .unwrap_or(false);

    let hovered = if over_ui {
        None
    } else {
        pick_gallery_item(
            window,
            camera,
            camera_transform,
            &spatial_query,
            &items,
            &orbit,
            &slide,
            &visibility,
        )
    };

    slide.hovered = hovered
        .filter(|item| item.kind == GalleryKind::Templates)
        .map(|item| item.index);

    let icon = if hovered.is_some() {
        SystemCursorIcon::Pointer
    } else {
        SystemCursorIcon::Default
    };
    commands.entity(window_entity).insert(CursorIcon::System(icon));
}

/// Route clicks on visible gallery items into the selection store.
fn click_gallery_items(
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    spatial_query: SpatialQuery,
    items: Query<&GalleryItem>,
    orbit: Res<OrbitRig>,
    slide: Res<SlideRig>,
    visibility: Query<&Visibility>,
    mut contexts: EguiContexts,
    mut open_events: MessageWriter<OpenSelectionEvent>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
            return;
        }
    }
    let Ok(window) = window_query.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    if let Some(item) = pick_gallery_item(
        window,
        camera,
        camera_transform,
        &spatial_query,
        &items,
        &orbit,
        &slide,
        &visibility,
    ) {
        open_events.write(OpenSelectionEvent { kind: item.kind, id: item.id });
    }
}
