//! Core value types (viewport, frame rate, color) and the crate error type.

pub(crate) mod core;
pub(crate) mod error;
