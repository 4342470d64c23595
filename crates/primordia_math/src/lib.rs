//! 2D Mathematics Library
//!
//! This crate provides the small set of planar types shared by the
//! Primordia simulation, input and rendering crates.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x, y components
//! - [`Bound2`] - Rectangular simulation extent anchored at the origin

mod vec2;
mod bound;

pub use vec2::Vec2;
pub use bound::Bound2;
