pub mod app;
pub mod config;
pub mod maze;
pub mod solvers;
