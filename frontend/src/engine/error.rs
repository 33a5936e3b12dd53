use thiserror::Error;

/// Failures that abort a spin before any animation state is mutated.
///
/// Numeric edge cases (degenerate probabilities, unmeasurable containers,
/// floating-point drift) are recovered inside the engine and never appear
/// here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("this case has no items to display")]
    EmptyCatalog,
    #[error("the server returned no result for this spin")]
    MissingOutcome,
    #[error("a spin is already in progress")]
    SpinInProgress,
}

impl EngineError {
    /// Whether the failure should surface as a user-visible message.
    /// A request while a spin is in flight is a silent no-op.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, EngineError::SpinInProgress)
    }
}
