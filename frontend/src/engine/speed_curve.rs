//! Deceleration profile for the full-length reel spin.
//!
//! The table maps normalized elapsed time to instantaneous scroll speed:
//! a quick ramp to peak, a long near-peak plateau through the middle of
//! the timeline, then a tail that creeps at sub-pixel-per-frame speeds
//! over the final few percent. Position comes from integrating the
//! profile, normalized so the reel covers exactly the planned distance.

/// (normalized time, relative speed) breakpoints. Times must be strictly
/// increasing from 0.0 to 1.0; speed reaches zero only at the very end.
const SPEED_TABLE: &[(f64, f64)] = &[
    (0.00, 0.80),
    (0.08, 1.00),
    (0.45, 0.90),
    (0.65, 0.50),
    (0.80, 0.20),
    (0.90, 0.06),
    (0.97, 0.012),
    (1.00, 0.0),
];

/// Relative speed at normalized time `t`, linearly interpolated between
/// breakpoints. Input outside [0, 1] is clamped.
pub fn speed_at(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    for pair in SPEED_TABLE.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if t <= t1 {
            let span = t1 - t0;
            let frac = if span > 0.0 { (t - t0) / span } else { 1.0 };
            return v0 + (v1 - v0) * frac;
        }
    }
    0.0
}

/// Fraction of the total travel distance covered after normalized time
/// `t`: the integral of the speed profile over [0, t], scaled so that
/// `progress(1.0) == 1.0`. Strictly monotonic on [0, 1).
pub fn progress(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    area_to(t) / area_to(1.0)
}

fn area_to(t: f64) -> f64 {
    let mut area = 0.0;
    for pair in SPEED_TABLE.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if t <= t0 {
            break;
        }
        if t >= t1 {
            area += (v0 + v1) / 2.0 * (t1 - t0);
        } else {
            // partial trapezoid up to t
            let vt = speed_at(t);
            area += (v0 + vt) / 2.0 * (t - t0);
            break;
        }
    }
    area
}

/// Single-segment easing used by fast mode and the wheel. Quartic
/// ease-out: most of the travel happens early, then a smooth stop.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_endpoints() {
        assert_eq!(progress(0.0), 0.0);
        assert!((progress(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_progress_monotonic() {
        let mut prev = 0.0;
        for i in 1..=1000 {
            let p = progress(i as f64 / 1000.0);
            assert!(p > prev, "progress not monotonic at step {}", i);
            prev = p;
        }
    }

    #[test]
    fn test_plateau_then_long_tail() {
        // Most of the distance is gone well before the end; the final ten
        // percent of the timeline moves less than one percent of the track.
        assert!(progress(0.5) > 0.6);
        assert!(progress(0.9) > 0.99);
        assert!(progress(0.97) < 1.0);
    }

    #[test]
    fn test_speed_clamps_out_of_range() {
        assert_eq!(speed_at(-1.0), SPEED_TABLE[0].1);
        assert_eq!(speed_at(2.0), 0.0);
    }

    #[test]
    fn test_ease_out_cubic_bounds() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }
}
