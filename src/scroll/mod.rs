//! Virtual scroll track
//!
//! The whole experience is driven by one normalized scroll offset. Wheel and
//! keyboard input advance a clamped target position; a damped step converges
//! the published offset toward it each frame. [`ScrollProgress`] is the single
//! read-only value every controller consumes — nothing else writes it.

use bevy::input::mouse::{AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;

use crate::anim::{approach, sanitize_offset};
use crate::constants::scroll;
use crate::stage::ShowcaseState;

/// The damped, clamped scroll offset published to every controller.
/// 0 = top of the track, 1 = bottom. Read-only outside this module.
#[derive(Debug, Clone, Copy, Resource, Default)]
pub struct ScrollProgress {
    pub offset: f32,
}

/// Internal track state: where the user has scrolled to and where the damped
/// offset currently sits.
#[derive(Debug, Clone, Copy, Resource, Default)]
pub struct ScrollState {
    /// Raw target position from input, clamped to [0, 1]
    pub target: f32,
    /// Damped position converging toward `target`
    pub offset: f32,
}

impl ScrollState {
    /// Nudge the target by a (possibly negative) track fraction.
    pub fn push(&mut self, delta: f32) {
        self.target = sanitize_offset(self.target + delta);
    }

    /// Jump the target to an absolute track position.
    pub fn jump(&mut self, target: f32) {
        self.target = sanitize_offset(target);
    }

    /// Advance the damped offset one frame. Pure: same state + dt in, same
    /// state out. Zero dt leaves the offset untouched.
    pub fn step(&mut self, dt: f32) {
        self.offset = sanitize_offset(approach(self.offset, self.target, scroll::DAMPING_RATE, dt));
    }
}

pub struct ScrollPlugin;

impl Plugin for ScrollPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScrollState>()
            .init_resource::<ScrollProgress>()
            .add_systems(
                Update,
                (gather_scroll_input, publish_scroll_progress)
                    .chain()
                    .run_if(in_state(ShowcaseState::Running)),
            );
    }
}

/// Feed wheel and keyboard input into the scroll target.
fn gather_scroll_input(
    wheel: Res<AccumulatedMouseScroll>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<ScrollState>,
) {
    // Wheel down (negative delta) moves down the track
    if wheel.delta.y != 0.0 {
        let step = match wheel.unit {
            MouseScrollUnit::Line => scroll::LINE_STEP,
            MouseScrollUnit::Pixel => scroll::PIXEL_STEP,
        };
        state.push(-wheel.delta.y * step);
    }

    if keyboard.just_pressed(KeyCode::PageDown) {
        state.push(scroll::PAGE_STEP);
    }
    if keyboard.just_pressed(KeyCode::PageUp) {
        state.push(-scroll::PAGE_STEP);
    }
    if keyboard.just_pressed(KeyCode::Home) {
        state.jump(0.0);
    }
    if keyboard.just_pressed(KeyCode::End) {
        state.jump(1.0);
    }
}

/// Damp the offset toward the target and publish it. This is the only writer
/// of [`ScrollProgress`].
fn publish_scroll_progress(
    time: Res<Time>,
    mut state: ResMut<ScrollState>,
    mut progress: ResMut<ScrollProgress>,
) {
    state.step(time.delta_secs());
    progress.offset = state.offset;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_is_always_clamped() {
        let mut state = ScrollState::default();
        state.push(2.0);
        assert_eq!(state.target, 1.0);
        state.push(-5.0);
        assert_eq!(state.target, 0.0);
    }

    #[test]
    fn nan_input_degrades_to_the_top_of_track() {
        let mut state = ScrollState::default();
        state.push(f32::NAN);
        assert_eq!(state.target, 0.0);
        state.jump(f32::NAN);
        assert_eq!(state.target, 0.0);
        state.step(1.0 / 60.0);
        assert!(state.offset.is_finite());
    }

    #[test]
    fn offset_converges_on_the_target() {
        let mut state = ScrollState::default();
        state.jump(1.0);
        for _ in 0..600 {
            state.step(1.0 / 60.0);
        }
        assert!((state.offset - 1.0).abs() < 1e-3);
    }

    #[test]
    fn zero_dt_step_changes_nothing() {
        let mut state = ScrollState::default();
        state.jump(0.7);
        state.step(1.0 / 60.0);
        let before = state.offset;
        state.step(0.0);
        assert_eq!(state.offset, before);
    }

    #[test]
    fn scrolling_back_up_is_symmetric() {
        let mut state = ScrollState::default();
        state.jump(1.0);
        for _ in 0..600 {
            state.step(1.0 / 60.0);
        }
        state.jump(0.0);
        for _ in 0..600 {
            state.step(1.0 / 60.0);
        }
        assert!(state.offset < 1e-3);
    }
}
