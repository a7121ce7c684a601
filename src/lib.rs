//! Volumetric grid construction from planar grids.
//!
//! A [`grid2d::Grid2D`] is turned into a [`grid3d::Grid3D`] either by
//! revolving it around an in-plane axis
//! ([`operations::revolve::Revolve`]) or by sweeping it along z
//! ([`operations::sweep::Sweep`]).

pub mod error;
pub mod grid2d;
pub mod grid3d;
pub mod math;
pub mod operations;

pub use error::{Result, VolgridError};
