//! Shared interpolation math for the per-frame controllers
//!
//! Everything here is a pure function of its inputs so the controllers can be
//! exercised without a running render loop.

/// Sanitize a scroll offset before it reaches any pose math.
///
/// NaN degrades to the top-of-track pose; infinities clamp to the nearest
/// boundary. Every published offset goes through this exactly once.
pub fn sanitize_offset(offset: f32) -> f32 {
    if offset.is_nan() {
        0.0
    } else {
        offset.clamp(0.0, 1.0)
    }
}

/// Frame-rate independent exponential approach toward `target`.
///
/// `current += (target - current) * rate * dt`, with the step clamped so a
/// long frame cannot overshoot the target.
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let t = (rate * dt).clamp(0.0, 1.0);
    current + (target - current) * t
}

/// Normalized progress of `offset` through `[start, end]`, clamped to [0, 1].
///
/// A degenerate range (`end <= start`) acts as an instantaneous threshold at
/// `start` instead of dividing by zero.
pub fn ramp(offset: f32, start: f32, end: f32) -> f32 {
    if end <= start {
        return if offset >= start { 1.0 } else { 0.0 };
    }
    ((offset - start) / (end - start)).clamp(0.0, 1.0)
}

/// Two-ramp fade window: rise over the early progress, fall over the tail,
/// composed by taking the minimum of the two ramps.
pub fn fade_window(progress: f32, in_gain: f32, out_start: f32, out_gain: f32) -> f32 {
    let fade_in = (progress * in_gain).min(1.0);
    let fade_out = (1.0 - (progress - out_start) * out_gain).min(1.0);
    fade_in.min(fade_out).max(0.0)
}

/// Gaussian focus weight for item `index` of `count` at track `progress`.
///
/// Peaks at 1 when `index / count == progress` and falls off as the bell
/// curve of the distance, sharpened by `sharpness`.
pub fn gaussian_weight(index: usize, count: usize, progress: f32, sharpness: f32) -> f32 {
    let dist = index as f32 / count.max(1) as f32 - progress;
    (-dist * dist * sharpness).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_clamps_and_defuses_nan() {
        assert_eq!(sanitize_offset(f32::NAN), 0.0);
        assert_eq!(sanitize_offset(f32::INFINITY), 1.0);
        assert_eq!(sanitize_offset(f32::NEG_INFINITY), 0.0);
        assert_eq!(sanitize_offset(-0.5), 0.0);
        assert_eq!(sanitize_offset(1.5), 1.0);
        assert_eq!(sanitize_offset(0.42), 0.42);
    }

    #[test]
    fn approach_converges_without_overshoot() {
        let mut v = 0.0;
        for _ in 0..600 {
            v = approach(v, 1.0, 1.0, 1.0 / 60.0);
        }
        assert!(v > 0.999 && v <= 1.0);

        // A pathologically long frame clamps at the target instead of passing it
        assert_eq!(approach(0.0, 1.0, 10.0, 1.0), 1.0);
    }

    #[test]
    fn approach_is_identity_at_zero_dt() {
        assert_eq!(approach(0.3, 1.0, 4.0, 0.0), 0.3);
    }

    #[test]
    fn ramp_clamps_to_unit_interval() {
        assert_eq!(ramp(0.0, 0.2, 0.6), 0.0);
        assert_eq!(ramp(0.4, 0.2, 0.6), 0.5);
        assert_eq!(ramp(1.0, 0.2, 0.6), 1.0);
    }

    #[test]
    fn degenerate_ramp_is_a_threshold() {
        assert_eq!(ramp(0.49, 0.5, 0.5), 0.0);
        assert_eq!(ramp(0.5, 0.5, 0.5), 1.0);
        assert_eq!(ramp(0.51, 0.5, 0.5), 1.0);
    }

    #[test]
    fn fade_window_takes_the_minimum_ramp() {
        // Early: rising edge dominates
        assert!(fade_window(0.1, 3.0, 0.7, 3.0) < 1.0);
        // Middle: fully visible
        assert_eq!(fade_window(0.5, 3.0, 0.7, 3.0), 1.0);
        // Late: falling edge dominates
        let late = fade_window(0.9, 3.0, 0.7, 3.0);
        assert!(late > 0.0 && late < 1.0);
        // Past the end: fully faded
        assert_eq!(fade_window(1.1, 3.0, 0.7, 3.0), 0.0);
    }

    #[test]
    fn gaussian_peaks_at_center_and_decays_monotonically() {
        // N=8, progress 0.5: item 4 is the focus
        let weights: Vec<f32> = (0..8).map(|i| gaussian_weight(i, 8, 0.5, 30.0)).collect();
        let max_index = weights
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(max_index, 4);
        assert!((weights[4] - 1.0).abs() < 1e-6);

        // Weight decays as the distance from the focus grows
        assert!(weights[4] > weights[5]);
        assert!(weights[5] > weights[6]);
        assert!(weights[6] > weights[7]);
        assert!(weights[3] > weights[2]);
        assert!(weights[2] > weights[1]);
    }
}
