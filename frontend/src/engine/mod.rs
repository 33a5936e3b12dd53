// Outcome-to-animation reconciliation engine.
//
// The server is the sole source of truth for outcomes; everything in this
// module turns an already-decided result into a randomized-looking reel
// scroll or wheel rotation that is guaranteed to terminate on that result.
// No module here touches the DOM: pages sample the computed timelines from
// their own requestAnimationFrame loops and render the derived offsets.

pub mod error;
pub mod layout_cache;
pub mod offset;
pub mod reel;
pub mod scheduler;
pub mod sequence;
pub mod speed_curve;
pub mod targeting;
pub mod zones;

pub use error::EngineError;
pub use scheduler::SpinScheduler;

/// One logical animation track: a case-opening reel lane or the upgrade
/// wheel. Keys are stable across re-renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SurfaceKey {
    Field1,
    Field2,
    Field3,
    Field4,
    Wheel,
}

impl SurfaceKey {
    pub const CASE_LANES: [SurfaceKey; 4] = [
        SurfaceKey::Field1,
        SurfaceKey::Field2,
        SurfaceKey::Field3,
        SurfaceKey::Field4,
    ];

    pub fn group(self) -> SurfaceGroup {
        match self {
            SurfaceKey::Wheel => SurfaceGroup::Upgrade,
            _ => SurfaceGroup::CaseLanes,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SurfaceKey::Field1 => "field1",
            SurfaceKey::Field2 => "field2",
            SurfaceKey::Field3 => "field3",
            SurfaceKey::Field4 => "field4",
            SurfaceKey::Wheel => "wheel",
        }
    }
}

/// Surfaces that spin together and settle together. The case lanes form
/// one group; the upgrade wheel is its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceGroup {
    CaseLanes,
    Upgrade,
}
