//! Orrery Core - Foundational types for the Orrery particle field
//!
//! This crate provides the types that all other Orrery crates depend on:
//! - `Color` - RGBA colour with CSS-style parsing
//! - `Point` - 2D surface coordinate
//! - Error types and Result alias

mod error;
mod types;

pub use error::{OrreryError, Result};
pub use types::{Color, Point};
