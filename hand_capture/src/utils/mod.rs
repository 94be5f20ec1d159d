//! Shared helper types

pub mod float;
pub mod location;

pub use location::CellLocation;
