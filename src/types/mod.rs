//! Core types shared by agents and recipes.

pub mod generation;

pub use generation::*;
