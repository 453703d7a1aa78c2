//! Cellular automaton simulation engine.
//!
//! This crate implements the toroidal grid, the per-family transition rules
//! and the world controller that advances generations.

pub mod engine;
pub mod grid;
pub mod rules;
pub mod world;

pub use engine::Engine;
pub use grid::Grid;
pub use world::{Census, Snapshot, World};
