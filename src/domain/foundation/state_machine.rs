//! State machine trait for lifecycle enums.
//!
//! Gives every status enum the same validated transition API, so callers
//! never assign a new state without checking that the move is legal.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors decide which moves are legal; `transition_to` comes for free.
///
/// # Example
///
/// ```ignore
/// let phase = AutoFillPhase::Idle.transition_to(AutoFillPhase::Running)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }
}
