//! Cell visitation order for a move.

use crate::{Direction, Position};
use tracing::instrument;

/// Column and row orders for one move.
///
/// Cells are visited column by column (`xs` outer, `ys` inner). The axis
/// along which tiles travel is reversed when they travel towards its end,
/// so the tile closest to the destination wall always moves first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    /// Column order.
    pub xs: Vec<usize>,
    /// Row order.
    pub ys: Vec<usize>,
}

impl Traversal {
    /// Every position in visitation order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.xs
            .iter()
            .flat_map(move |&x| self.ys.iter().map(move |&y| Position::new(x, y)))
    }
}

/// Builds the traversal for a direction on a `rows x cols` grid.
#[instrument]
pub fn build_traversal(direction: Direction, rows: usize, cols: usize) -> Traversal {
    let (dx, dy) = direction.vector();
    let mut xs: Vec<usize> = (0..cols).collect();
    let mut ys: Vec<usize> = (0..rows).collect();
    if dx == 1 {
        xs.reverse();
    }
    if dy == 1 {
        ys.reverse();
    }
    Traversal { xs, ys }
}
