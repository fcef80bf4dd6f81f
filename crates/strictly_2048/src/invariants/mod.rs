//! First-class invariants for the 2048 grid.
//!
//! Invariants are logical properties that must hold after every
//! transition. The engine checks them in debug builds; tests can check
//! them directly.

mod index_consistent;
mod power_of_two;
mod within_bounds;

pub use index_consistent::IndexMatchesPosition;
pub use power_of_two::PowerOfTwoValues;
pub use within_bounds::TilesWithinBounds;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples so sets compose without boxing.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match <(I1, I2)>::check_all(state) {
            Ok(()) => Vec::new(),
            Err(violations) => violations,
        };
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Every invariant the 2048 grid must satisfy.
pub type GridInvariants = (TilesWithinBounds, IndexMatchesPosition, PowerOfTwoValues);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Grid, Position, Tile, TileId};

    #[test]
    fn test_valid_grid_passes_all() {
        let grid = Grid::from_values(2, 2, &[2, 0, 4, 1024]).expect("valid grid");
        assert!(GridInvariants::check_all(&grid).is_ok());
    }

    #[test]
    fn test_violations_are_collected() {
        let mut grid = Grid::from_values(2, 2, &[2, 0, 0, 0]).expect("valid grid");
        grid.place_raw(3, Tile::new(TileId(9), Position::new(0, 0), 3));
        let violations = GridInvariants::check_all(&grid).expect_err("corrupted grid");
        assert_eq!(violations.len(), 2);
    }
}
