//! # vitrine
//!
//! A single continuous 3D scene driven entirely by scroll position. One
//! normalized offset (0 at the top of the track, 1 at the bottom) feeds a set
//! of independent, phase-based controllers:
//!
//! - a title that disperses into a receding spiral,
//! - a glass filter lens that contracts, flattens and finally fills the
//!   frame, refracting the content composited behind it,
//! - a project orbit and a template slide gallery with click-to-open modals,
//! - a contact section fading in over the tail of the track.
//!
//! The content sections render into an offscreen target each frame (see
//! [`compositor`]); the lens's transmissive material refracts that image.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bevy::prelude::*;
//! use vitrine::ShowcasePlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(ShowcasePlugin)
//!         .run();
//! }
//! ```
//!
//! Scroll with the mouse wheel (PageUp/PageDown/Home/End also work). Every
//! pose is a pure function of the offset and elapsed time, so scrubbing the
//! track in either direction replays the choreography exactly.

pub mod anim;
pub mod compositor;
pub mod constants;
pub mod contact;
pub mod content;
pub mod filter;
pub mod gallery;
pub mod noise;
pub mod phase;
pub mod scroll;
pub mod selection;
pub mod stage;
pub mod title;
pub mod ui;

// Re-export the main plugin
pub use stage::ShowcasePlugin;

// Re-export commonly used types
pub use content::{ContentEntry, ContentLibrary, GalleryKind};
pub use phase::{PhaseRange, PhaseSample, PhaseTrack};
pub use scroll::ScrollProgress;
pub use selection::{CloseSelectionEvent, OpenSelectionEvent, Selection, SelectionState};
pub use stage::ShowcaseState;
