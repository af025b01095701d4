//! Maze grid: provider trait, wall-flag grid, generation

mod generator;
mod grid;

pub use generator::{MazeLayout, generate};
pub use grid::{AsciiMarkers, GridMap, GridProvider, Maze};
