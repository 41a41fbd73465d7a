#![no_std]

//! Shared utility library for the marketplace contracts
//!
//! This library provides common functions, helpers, and patterns used across
//! the workspace including:
//! - Math utilities (safe basis-point math)
//! - Event emission patterns

pub mod events;
pub mod math;


// Re-export commonly used items
// These imports are primarily for external consumers of the crate.  We
// allow unused imports here to avoid warnings in the library itself.
#[allow(unused_imports)]
pub use events::*;
#[allow(unused_imports)]
pub use math::*;
