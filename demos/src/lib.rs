//! Shared helpers for the runnable demos under `examples/`.

/// Source selection and small printing helpers.
pub mod common;
