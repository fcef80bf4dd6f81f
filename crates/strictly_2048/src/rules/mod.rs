//! Game rules for 2048.
//!
//! Pure functions over a [`crate::Grid`]: the order in which a move visits
//! cells and whether any move is still possible. Kept apart from the engine
//! so they can be tested without randomness.

pub mod legal;
pub mod traversal;

pub use legal::can_move;
pub use traversal::{Traversal, build_traversal};
