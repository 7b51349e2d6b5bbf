//! **voxgrid-core**: core types for 3D occupancy-grid pathfinding.
//!
//! This crate provides the foundational types used across the *voxgrid*
//! workspace: the [`Point3`] coordinate with its canonical textual key,
//! [`Bounds`] cuboids, and the dense [`Grid3`] occupancy store.

pub mod geom;
pub mod grid;

pub use geom::{Bounds, BoundsIter, ParsePointError, Point3};
pub use grid::{Cell, Grid3, GridError};
