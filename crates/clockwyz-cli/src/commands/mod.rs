pub mod assistant;
pub mod board;
pub mod config;
pub mod grid;
pub mod habit;
