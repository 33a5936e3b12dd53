use super::speed_curve;

/// How a reel timeline maps elapsed time to travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReelDriveMode {
    /// Full speed-curve profile: ramp, plateau, long creeping tail.
    Normal,
    /// Single eased transition over a much shorter duration.
    Fast,
}

/// One lane's animation timeline, sampled by the page's rAF loop.
/// Completion is strictly time-based: the lane is done only once the full
/// duration has elapsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReelAnimation {
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
    pub mode: ReelDriveMode,
}

impl ReelAnimation {
    pub fn new(from: f64, to: f64, duration_ms: u32, mode: ReelDriveMode) -> Self {
        Self {
            from,
            to,
            duration_ms: f64::from(duration_ms),
            mode,
        }
    }

    /// Track offset after `elapsed_ms`. Clamped to the endpoints, so a
    /// frame arriving late still renders the exact final offset.
    pub fn offset_at(&self, elapsed_ms: f64) -> f64 {
        if elapsed_ms <= 0.0 {
            return self.from;
        }
        let t = (elapsed_ms / self.duration_ms).min(1.0);
        let progress = match self.mode {
            ReelDriveMode::Normal => speed_curve::progress(t),
            ReelDriveMode::Fast => speed_curve::ease_out_cubic(t),
        };
        self.from + (self.to - self.from) * progress
    }

    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let anim = ReelAnimation::new(0.0, -3000.0, 6500, ReelDriveMode::Normal);
        assert_eq!(anim.offset_at(0.0), 0.0);
        assert_eq!(anim.offset_at(-5.0), 0.0);
        assert!((anim.offset_at(6500.0) - -3000.0).abs() < 1e-9);
        assert!((anim.offset_at(9999.0) - -3000.0).abs() < 1e-9);
    }

    #[test]
    fn test_completion_is_time_based() {
        let anim = ReelAnimation::new(0.0, -3000.0, 6500, ReelDriveMode::Normal);
        assert!(!anim.is_complete(6499.9));
        assert!(anim.is_complete(6500.0));
    }

    #[test]
    fn test_normal_mode_moves_monotonically_toward_target() {
        let anim = ReelAnimation::new(100.0, -2900.0, 6500, ReelDriveMode::Normal);
        let mut prev = anim.offset_at(0.0);
        for step in 1..=650 {
            let offset = anim.offset_at(step as f64 * 10.0);
            assert!(offset < prev);
            prev = offset;
        }
    }

    #[test]
    fn test_fast_mode_front_loads_travel() {
        let anim = ReelAnimation::new(0.0, -1000.0, 1800, ReelDriveMode::Fast);
        let halfway = anim.offset_at(900.0);
        // Quartic ease-out covers well over half the distance by half time.
        assert!(halfway < -800.0);
    }
}
