//! Platform abstraction layer
//!
//! Turns raw browser/native input into simulation input.

pub mod input;

pub use input::KeyState;
