//! Storage abstraction and implementations for skill plans.
//!
//! This crate provides a trait-based plan store with a JSON file
//! implementation and an in-memory one.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;

pub use trait_::{PlanStore, StorageError, Result};
pub use json_storage::{JsonStorage, StoreConfig};
pub use memory::MemoryStorage;
