//! Value invariant: tiles only ever hold powers of two.

use super::Invariant;
use crate::Grid;

/// Invariant: every tile value is a power of two of at least 2.
pub struct PowerOfTwoValues;

impl Invariant<Grid> for PowerOfTwoValues {
    fn holds(grid: &Grid) -> bool {
        grid.tiles()
            .all(|tile| tile.value() >= 2 && tile.value().is_power_of_two())
    }

    fn description() -> &'static str {
        "Every tile value is a power of two >= 2"
    }
}
