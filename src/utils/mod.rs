// file: src/utils/mod.rs
// version: 1.0.0
// guid: bacd0f45-57a1-4140-9ea4-14ce884433cf

//! Utility modules for system operations

pub mod system;

pub use system::SystemUtils;
