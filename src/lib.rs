//! carefinder-rs
//!
//! Umbrella crate for the workspace. It re-exports [`carefinder_core`] so the
//! demos under `demos/` can `use carefinder_rs::prelude::*`.
//!
//! ```text
//! cargo run --example basic_usage
//! cargo run --example advanced_filtering
//! cargo run --example error_handling
//! ```

pub use carefinder_core::*;
