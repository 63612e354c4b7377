//! Infrastructure layer for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, so
//! user-facing paths from configuration are rewritten before use.

pub mod paths;

pub use paths::{data_dir, expand_tilde};
