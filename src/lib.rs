pub mod config;
pub mod problem;
pub mod solver;
pub mod stat;
pub mod state;
