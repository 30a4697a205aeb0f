//! Population management
//!
//! This module provides the Individual and Population types and the
//! initial-population generator boundary.

pub mod generator;
pub mod individual;
#[allow(clippy::module_inception)]
pub mod population;

pub mod prelude {
    pub use super::generator::*;
    pub use super::individual::*;
    pub use super::population::*;
}
