/**
* A live cell dies if it has fewer than two live neighbors.
* A live cell with two or three live neighbors lives on to the next generation.
* A live cell with more than three live neighbors dies.
* A dead cell will be brought back to live if it has exactly three live neighbors.
*
* The grid is a torus: the left edge touches the right edge and the top edge
* touches the bottom edge.
*/

pub mod clock;
pub mod config;
pub mod grid;
pub mod simulation;

pub use clock::TickClock;
pub use config::{ConfigError, LifeConfig, Rgba};
pub use grid::{CellState, Grid};
pub use simulation::Simulation;
