/// Partition of the wheel into a success arc and a failure arc.
///
/// The success arc spans `[0, success_arc_deg)` and the failure arc spans
/// `[success_arc_deg, 360)`; together they always cover the full circle
/// with no overlap. Recomputed from the live probability every spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneBoundary {
    success_arc_deg: f64,
}

impl ZoneBoundary {
    /// Probability at or beyond the [0, 100] bounds is clamped: 0 gives a
    /// zero-width success arc (every spin resolves to failure), 100 a
    /// full-circle one. Both are valid partitions, not errors.
    pub fn from_percent(success_probability_percent: f64) -> Self {
        Self {
            success_arc_deg: success_probability_percent.clamp(0.0, 100.0) / 100.0 * 360.0,
        }
    }

    pub fn success_arc_deg(&self) -> f64 {
        self.success_arc_deg
    }

    pub fn failure_arc_deg(&self) -> f64 {
        360.0 - self.success_arc_deg
    }

    /// (start, width) of the arc matching the outcome.
    pub fn arc_for(&self, success: bool) -> (f64, f64) {
        if success {
            (0.0, self.success_arc_deg)
        } else {
            (self.success_arc_deg, 360.0 - self.success_arc_deg)
        }
    }

    /// Whether an absolute rotation, taken mod 360, rests in the arc
    /// matching the outcome.
    pub fn contains(&self, rotation_deg: f64, success: bool) -> bool {
        let angle = rotation_deg.rem_euclid(360.0);
        if success {
            angle < self.success_arc_deg
        } else {
            angle >= self.success_arc_deg
        }
    }
}
