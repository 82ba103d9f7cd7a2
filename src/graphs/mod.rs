//! Concrete graphs built by the CLI.

pub mod ml_small;
