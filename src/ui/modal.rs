//! Project / template modal
//!
//! Consumes the selection store: whichever gallery item is selected, this
//! window shows its image and copy from the content tables, and closing it
//! clears the store.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass, EguiTextureHandle};

use crate::content::{ContentLibrary, GalleryKind};
use crate::selection::{CloseSelectionEvent, SelectionState};

/// Images registered with egui, cached by asset path.
#[derive(Resource, Default)]
pub struct ModalImages {
    cache: HashMap<String, egui::TextureId>,
}

pub struct ModalPlugin;

impl Plugin for ModalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModalImages>()
            .add_systems(EguiPrimaryContextPass, draw_selection_modal)
            .add_systems(Update, close_modal_on_escape);
    }
}

/// Draw the modal for the current selection, if any.
fn draw_selection_modal(
    mut contexts: EguiContexts,
    selection: Res<SelectionState>,
    content: Res<ContentLibrary>,
    asset_server: Res<AssetServer>,
    mut images: ResMut<ModalImages>,
    mut close_events: MessageWriter<CloseSelectionEvent>,
) -> Result {
    let Some(selected) = selection.selected else {
        return Ok(());
    };
    let Some(entry) = content.entry(selected.kind, selected.id) else {
        warn!("selection {:?} #{} has no content entry", selected.kind, selected.id);
        close_events.write(CloseSelectionEvent);
        return Ok(());
    };

    // Register the image with egui once per path.
    let texture_id = match images.cache.get(&entry.image) {
        Some(id) => *id,
        None => {
            let handle: Handle<Image> = asset_server.load(entry.image.clone());
            let id = contexts.add_image(EguiTextureHandle::Strong(handle));
            images.cache.insert(entry.image.clone(), id);
            id
        }
    };

    let heading = match selected.kind {
        GalleryKind::Projects => "Project",
        GalleryKind::Templates => "Template",
    };

    let ctx = contexts.ctx_mut()?;
    let mut open = true;
    egui::Window::new(format!("{heading} — {}", entry.title))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui| {
            ui.image(egui::load::SizedTexture::new(texture_id, [360.0, 220.0]));
            ui.add_space(8.0);
            ui.label(&entry.blurb);
            ui.add_space(8.0);
            if ui.button("Close").clicked() {
                close_events.write(CloseSelectionEvent);
            }
        });
    if !open {
        close_events.write(CloseSelectionEvent);
    }
    Ok(())
}

/// Escape also closes the modal.
fn close_modal_on_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    selection: Res<SelectionState>,
    mut close_events: MessageWriter<CloseSelectionEvent>,
) {
    if selection.selected.is_some() && keyboard.just_pressed(KeyCode::Escape) {
        close_events.write(CloseSelectionEvent);
    }
}
