// Animation tunables shared by the engine and the pages that drive it.
// Everything here is a deliberate knob; changing a value must not be able
// to break the engine's correctness invariants, only its feel.

/// Substitute reel-container width when the element has not been laid out
/// yet at spin start. Matches the rendered track width on a desktop layout.
pub const FALLBACK_CONTAINER_WIDTH_PX: f64 = 940.0;

/// Rendered width of one item card in a reel lane.
pub const CARD_WIDTH_PX: f64 = 128.0;

/// Horizontal gap between adjacent cards in a reel lane.
pub const CARD_GAP_PX: f64 = 8.0;

/// Total spread of the random landing perturbation. The settled card center
/// ends within half this range of the pointer mark. Must stay below
/// `CARD_WIDTH_PX` so the pointer can never rest outside the target card.
pub const LANDING_JITTER_RANGE_PX: f64 = 90.0;

/// Filler cards ahead of the result in single-reel mode, before the random
/// extra cushion. A single reel spans the full page width, so it needs a
/// longer run-up than the multi-lane layout.
pub const SINGLE_REEL_LEAD: usize = 42;
pub const SINGLE_REEL_EXTRA_MAX: usize = 10;

/// Filler cards ahead of the result in multi-lane mode.
pub const MULTI_REEL_LEAD: usize = 24;
pub const MULTI_REEL_EXTRA_MAX: usize = 6;

/// Filler cards appended after the result so the track does not visibly
/// end right behind the settled card.
pub const REEL_TAIL: usize = 6;

/// Full-profile reel spin, driven by the speed curve table.
pub const REEL_SPIN_DURATION_MS: u32 = 6500;

/// Fast-mode reel spin, driven by a single eased transition.
pub const REEL_FAST_DURATION_MS: u32 = 1800;

/// Wheel spin duration for the upgrade game.
pub const WHEEL_SPIN_DURATION_MS: u32 = 6000;

/// Guaranteed full turns added to every wheel spin, plus a random extra
/// count on top, purely for visual effect.
pub const WHEEL_BASE_TURNS: u32 = 4;
pub const WHEEL_EXTRA_TURNS_MAX: u32 = 3;

/// Inward margin from both arc edges when picking a landing angle, so the
/// wheel never rests ambiguously on a zone boundary. For arcs narrower
/// than twice this margin the engine collapses it to a quarter of the arc
/// instead of picking outside the arc.
pub const WHEEL_EDGE_MARGIN_DEG: f64 = 4.0;

/// Allowed deviation between the planned landing angle and the rotation's
/// value mod 360 before the exact drift correction kicks in. Large
/// accumulated rotations lose sub-degree precision in f64.
pub const WHEEL_DRIFT_TOLERANCE_DEG: f64 = 0.25;

/// Case opening supports one to four simultaneous lanes.
pub const MAX_CASE_LANES: usize = 4;
