//! Centralized constants for the showcase
//!
//! This module contains all tuned values — scroll ranges, phase boundaries,
//! layout sizes, palettes — to ensure consistency across the codebase.

use bevy::prelude::*;

/// Main camera placement and projection
pub mod camera {
    use super::*;

    /// Camera position; the whole scene plays out near the origin
    pub const POSITION: Vec3 = Vec3::new(0.0, 0.0, 5.0);
    /// Narrow field of view (degrees) for a flat, telephoto look
    pub const FOV_DEGREES: f32 = 5.0;
}

/// Virtual scroll track tuning
pub mod scroll {
    /// Exponential damping rate toward the scroll target (per second)
    pub const DAMPING_RATE: f32 = 4.0;
    /// Track fraction advanced per wheel line
    pub const LINE_STEP: f32 = 0.015;
    /// Track fraction advanced per wheel pixel
    pub const PIXEL_STEP: f32 = 0.0003;
    /// Track fraction advanced per PageUp/PageDown press
    pub const PAGE_STEP: f32 = 1.0 / 15.0;
}

/// Filter lens phase boundaries and material settings
pub mod filter {
    /// Lens scale at the top of the track
    pub const BASE_SCALE: f32 = 0.15;
    /// Lens scale at the end of the contract phase
    pub const MIN_SCALE: f32 = 0.04;

    /// Contract phase: 0 .. PHASE1_END
    pub const PHASE1_END: f32 = 0.4;
    /// Rectify phase: PHASE2_START .. PHASE2_END (result held until PHASE3_START)
    pub const PHASE2_START: f32 = 0.58;
    pub const PHASE2_END: f32 = 0.6;
    /// Expand phase: PHASE3_START .. PHASE3_END
    pub const PHASE3_START: f32 = 0.8;
    pub const PHASE3_END: f32 = 1.0;

    /// X/Y scale gained over the rectify phase (flattens the lens into a bar)
    pub const RECTIFY_GAIN_X: f32 = 0.15;
    pub const RECTIFY_GAIN_Y: f32 = 0.08;
    /// Screen-filling target scale at full expand
    pub const EXPAND_TARGET_X: f32 = 0.2;
    pub const EXPAND_TARGET_Y: f32 = 1.35;
    /// Z thickness gained over the expand phase
    pub const EXPAND_GAIN_Z: f32 = 0.01;

    /// Rotation jitter amplitude during contract/hold
    pub const JITTER_CONTRACT: f32 = 0.1;
    /// Rotation jitter amplitude at the end of rectify
    pub const JITTER_RECTIFY: f32 = 0.05;

    /// Transmissive material settings (glass look)
    pub const IOR: f32 = 1.2;
    pub const THICKNESS: f32 = 1.5;
    pub const TRANSMISSION: f32 = 0.9;
    /// Static roughness/metalness before the breathing overlay takes over
    pub const BASE_ROUGHNESS: f32 = 0.15;
    pub const BASE_METALNESS: f32 = 0.3;
    /// Breathing means, amplitudes and rates for roughness/metalness
    pub const ROUGHNESS_MEAN: f32 = 0.3;
    pub const ROUGHNESS_AMP: f32 = 0.1;
    pub const ROUGHNESS_RATE: f32 = 1.5;
    pub const METALNESS_MEAN: f32 = 0.8;
    pub const METALNESS_AMP: f32 = 0.2;
    pub const METALNESS_RATE: f32 = 2.0;

    /// Lens mesh asset (first primitive of the GLB)
    pub const MESH_PATH: &str = "models/filter_lens.glb";
}

/// Title spiral layout
pub mod title {
    use super::*;

    /// Number of stacked title copies
    pub const COPY_COUNT: usize = 150;
    /// Spiral angle per copy index (radians)
    pub const ANGLE_STEP: f32 = 0.3;
    /// Spiral radius per copy index (world units)
    pub const RADIUS_STEP: f32 = 0.006;
    /// Depth recession per copy index
    pub const DEPTH_STEP: f32 = 0.05;
    /// Foreground copy resting Z and its forward push at full spread
    pub const FRONT_Z: f32 = 0.01;
    pub const FRONT_Z_SPREAD: f32 = 0.5;
    /// Spread approach rate (per second)
    pub const SPREAD_RATE: f32 = 1.0;
    /// Offset above which the spiral disperses
    pub const SPREAD_THRESHOLD: f32 = 0.01;
    /// Spread below this snaps to exactly zero
    pub const SPREAD_EPSILON: f32 = 0.001;
    /// Whole-group vertical travel per unit of offset
    pub const RISE_GAIN: f32 = 2.0;
    /// Title quad size (world units)
    pub const QUAD_SIZE: Vec2 = Vec2::new(0.5, 0.2);

    /// Copy tint palette, cycled by index
    pub const PALETTE: [Color; 8] = [
        Color::srgb(0.0, 0.0, 0.0),
        Color::srgb(0.184, 0.482, 0.612),
        Color::srgb(0.212, 0.224, 0.224),
        Color::srgb(0.651, 0.118, 0.102),
        Color::srgb(0.949, 0.765, 0.0),
        Color::srgb(0.118, 0.373, 0.659),
        Color::srgb(0.769, 0.086, 0.110),
        Color::srgb(0.118, 0.435, 0.722),
    ];

    /// Pre-rendered title glyph texture
    pub const IMAGE_PATH: &str = "images/title.png";

    /// Backdrop color at the top of the track
    pub const BACKGROUND_TOP: Color = Color::srgb(1.0, 1.0, 1.0);
    /// Backdrop color at the bottom of the track
    pub const BACKGROUND_BOTTOM: Color = Color::srgb(0.910, 0.894, 0.863);
}

/// Project orbit gallery ranges and layout
pub mod orbit {
    use super::*;

    /// Scroll range: items open, then rotate, then the orbit expands away
    pub const START_OFFSET: f32 = 0.35;
    pub const FULL_OFFSET: f32 = 0.42;
    pub const ROTATE_END_OFFSET: f32 = 0.52;
    pub const EXPAND_END_OFFSET: f32 = 0.62;

    /// Orbit radius when fully open (world units)
    pub const RADIUS: f32 = 0.18;
    /// Extra angle gained while opening
    pub const OPEN_TWIST: f32 = std::f32::consts::PI * 0.1;
    /// Angle swept over the rotate phase
    pub const ROTATE_SWEEP: f32 = std::f32::consts::PI * 0.5;
    /// Radius multiplier gained over the expand phase
    pub const EXPAND_GAIN: f32 = 5.0;
    /// Item quad size
    pub const ITEM_SCALE: Vec2 = Vec2::new(0.24, 0.12);
    /// Per-item fade-in delay and gain
    pub const FADE_DELAY: f32 = 0.05;
    pub const FADE_GAIN: f32 = 2.0;
    /// Opening progress below which the whole group stays hidden
    pub const VISIBILITY_FLOOR: f32 = 0.05;
}

/// Template slide gallery ranges and layout
pub mod slide {
    use super::*;

    /// Scroll range the slide is active over
    pub const START_OFFSET: f32 = 0.65;
    pub const END_OFFSET: f32 = 0.85;

    /// Item quad size and spacing
    pub const ITEM_SCALE: Vec2 = Vec2::new(0.3, 0.225);
    pub const GAP: f32 = 0.2;
    /// Group start X and resting Z
    pub const START_X: f32 = 0.5;
    pub const DEPTH: f32 = 0.3;
    /// Extra travel past the row width so items leave the left edge
    pub const EXTRA_TRAVEL: f32 = 0.8;
    /// Fade-in gain over early progress, fade-out start and gain
    pub const FADE_IN_GAIN: f32 = 3.0;
    pub const FADE_OUT_START: f32 = 0.7;
    pub const FADE_OUT_GAIN: f32 = 3.0;
    /// Gaussian focus sharpness (desaturation falloff)
    pub const FOCUS_SHARPNESS: f32 = 30.0;
    /// Desaturation approach smoothing time (seconds)
    pub const FOCUS_SMOOTHING: f32 = 0.15;
    /// Hover enlargement and its approach rate
    pub const HOVER_SCALE: f32 = 1.1;
    pub const HOVER_RATE: f32 = 8.0;
}

/// Contact section ramps
pub mod contact {
    use super::*;

    /// "CONTACT" text ramp start
    pub const START_OFFSET: f32 = 0.86;
    /// Contact form ramp start
    pub const FORM_START_OFFSET: f32 = 0.95;
    /// Both ramps complete here
    pub const FULL_OFFSET: f32 = 1.0;
    /// Text stays hidden until its ramp clears this
    pub const TEXT_THRESHOLD: f32 = 0.1;
    /// Form ignores the pointer below this opacity
    pub const INTERACT_THRESHOLD: f32 = 0.5;

    /// Text quad size and placement
    pub const TEXT_SIZE: Vec2 = Vec2::new(0.8, 0.15);
    pub const TEXT_Z: f32 = -0.1;
    pub const GROUP_Z: f32 = 0.5;

    /// Pre-rendered "CONTACT" glyph texture
    pub const TEXT_IMAGE_PATH: &str = "images/contact_text.png";
}

/// Procedural roughness noise
pub mod noise {
    /// Texture edge length in pixels
    pub const SIZE: u32 = 128;
    /// Sin/cos frequency in pixel space
    pub const FREQUENCY: f32 = 0.1;
}
