//! Core engine types and utilities for the lander.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Fixed-rate frame timing
//! - Obstacle components shared by generation, physics and rendering

pub mod components;
pub mod time;

pub use components::*;
pub use time::*;

// Re-export commonly used types
pub use glam::{Vec2, Vec3};
pub use hecs::World;
