//! Genetic operators
//!
//! The operator contracts and the built-in operator library. Every concrete
//! operator implements only its policy hook; the gate logic lives in the
//! provided trait methods.

pub mod crossover;
pub mod elitism;
pub mod mutation;
pub mod preset;
pub mod selection;
pub mod traits;

pub mod prelude {
    pub use super::crossover::*;
    pub use super::elitism::*;
    pub use super::mutation::*;
    pub use super::preset::*;
    pub use super::selection::*;
    pub use super::traits::*;
}
