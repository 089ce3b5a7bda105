//! Loading gate for the showcase
//!
//! Animation systems only run once every tracked asset has finished loading
//! (or failed — a failed asset logs and its element degrades to not rendering,
//! it never blocks the experience).

use bevy::asset::{LoadState, UntypedHandle};
use bevy::prelude::*;

/// State machine gating the scroll choreography on asset readiness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, States)]
pub enum ShowcaseState {
    /// Tracked assets are still loading; the intro overlay is visible
    #[default]
    Loading,
    /// Everything resolved; the per-frame choreography is live
    Running,
}

/// Handles that must resolve before the showcase starts, plus progress
/// counters for the intro overlay.
#[derive(Resource, Default)]
pub struct RequiredAssets {
    handles: Vec<UntypedHandle>,
    /// Number of tracked handles fully loaded
    pub loaded: usize,
    /// Number of tracked handles that failed (logged, non-fatal)
    pub failed: usize,
}

impl RequiredAssets {
    /// Register a handle the loading gate should wait on.
    pub fn track<A: Asset>(&mut self, handle: &Handle<A>) {
        self.handles.push(handle.clone().untyped());
    }

    pub fn total(&self) -> usize {
        self.handles.len()
    }

    /// Fraction of tracked assets resolved (0.0 to 1.0)
    pub fn fraction(&self) -> f32 {
        if self.handles.is_empty() {
            return 1.0;
        }
        (self.loaded + self.failed) as f32 / self.handles.len() as f32
    }

    pub fn is_complete(&self) -> bool {
        self.loaded + self.failed >= self.handles.len()
    }
}

pub struct StageStatePlugin;

impl Plugin for StageStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<ShowcaseState>()
            .init_resource::<RequiredAssets>()
            .add_systems(
                Update,
                track_asset_loading.run_if(in_state(ShowcaseState::Loading)),
            );
    }
}

/// Poll tracked handles and flip to Running once they have all resolved.
fn track_asset_loading(
    asset_server: Res<AssetServer>,
    mut required: ResMut<RequiredAssets>,
    mut next_state: ResMut<NextState<ShowcaseState>>,
) {
    let mut loaded = 0;
    let mut failed = 0;
    for handle in &required.handles {
        match asset_server.load_state(handle.id()) {
            LoadState::Loaded => loaded += 1,
            LoadState::Failed(err) => {
                if required.failed == 0 {
                    warn!("asset failed to load, its element will not render: {err}");
                }
                failed += 1;
            }
            _ => {}
        }
    }
    required.loaded = loaded;
    required.failed = failed;

    if required.is_complete() {
        info!(
            "showcase ready: {} assets loaded, {} failed",
            required.loaded, required.failed
        );
        next_state.set(ShowcaseState::Running);
    }
}
