// src/core/persistence/mod.rs

pub mod snapshot;

pub use snapshot::{load, save};
