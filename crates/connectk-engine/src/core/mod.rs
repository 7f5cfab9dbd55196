pub use self::{cell::*, grid_state::*, line::*};

pub(crate) mod cell;
pub(crate) mod grid_state;
pub(crate) mod line;

/// Maximum number of columns of a grid.
pub const MAX_WIDTH: usize = 16;
/// Maximum number of rows of a grid.
pub const MAX_HEIGHT: usize = 16;
/// Maximum number of cells in a single row, column or diagonal.
pub const MAX_LINE_LEN: usize = if MAX_WIDTH > MAX_HEIGHT {
    MAX_WIDTH
} else {
    MAX_HEIGHT
};
