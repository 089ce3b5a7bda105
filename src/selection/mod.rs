//! Selection store
//!
//! Process-wide record of which gallery item is open in a modal. Gallery click
//! handlers write [`OpenSelectionEvent`]; the modal UI (an external consumer
//! of this store) reads [`SelectionState`] and writes [`CloseSelectionEvent`].
//! The apply systems here are the store's only writers — last click wins.

use bevy::prelude::*;

use crate::content::GalleryKind;

/// A kind-qualified item id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub kind: GalleryKind,
    pub id: u32,
}

/// Open the modal for one gallery item.
#[derive(Message)]
pub struct OpenSelectionEvent {
    pub kind: GalleryKind,
    pub id: u32,
}

/// Close whatever modal is open.
#[derive(Message)]
pub struct CloseSelectionEvent;

/// The single selection slot consumed by the modal UI.
#[derive(Resource, Debug, Default)]
pub struct SelectionState {
    pub selected: Option<Selection>,
}

impl SelectionState {
    pub fn open(&mut self, kind: GalleryKind, id: u32) {
        self.selected = Some(Selection { kind, id });
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    /// The open item's id, if any (the §6 `selectedId` view of the store).
    pub fn selected_id(&self) -> Option<u32> {
        self.selected.map(|selection| selection.id)
    }
}

pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectionState>()
            .add_message::<OpenSelectionEvent>()
            .add_message::<CloseSelectionEvent>()
            .add_systems(Update, (apply_open_events, apply_close_events).chain());
    }
}

/// Apply open requests; when several land in one frame the last one wins.
fn apply_open_events(
    mut events: MessageReader<OpenSelectionEvent>,
    mut state: ResMut<SelectionState>,
) {
    if let Some(event) = events.read().last() {
        state.open(event.kind, event.id);
        info!("selection opened: {:?} #{}", event.kind, event.id);
    }
}

fn apply_close_events(
    mut events: MessageReader<CloseSelectionEvent>,
    mut state: ResMut<SelectionState>,
) {
    if events.read().next().is_some() && state.selected.is_some() {
        state.close();
        info!("selection closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let state = SelectionState::default();
        assert_eq!(state.selected_id(), None);
    }

    #[test]
    fn open_then_close_round_trips() {
        let mut state = SelectionState::default();
        state.open(GalleryKind::Projects, 3);
        assert_eq!(
            state.selected,
            Some(Selection { kind: GalleryKind::Projects, id: 3 })
        );
        assert_eq!(state.selected_id(), Some(3));
        state.close();
        assert_eq!(state.selected, None);
    }

    #[test]
    fn last_open_wins() {
        let mut state = SelectionState::default();
        state.open(GalleryKind::Projects, 1);
        state.open(GalleryKind::Templates, 7);
        assert_eq!(
            state.selected,
            Some(Selection { kind: GalleryKind::Templates, id: 7 })
        );
    }
}
