mod check_grid;

pub use check_grid::{CheckGrid, GridReport};
