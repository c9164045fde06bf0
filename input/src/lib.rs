//! Pointer input for the particle field.
//!
//! The host feeds cursor positions in pixels, the field reads the latest
//! position in normalized device coordinates once per frame.

mod pointer;

pub use pointer::{normalize, Pointer, SharedPointer};
