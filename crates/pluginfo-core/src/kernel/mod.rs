//! # PlugInfo Core Kernel
//!
//! Shared foundations for the rest of the crate: the top-level
//! [`Error`](error::Error) type with its `Result` alias, and the
//! application-wide constants in [`constants`].
pub mod constants;
pub mod error;

pub use error::{Error, Result};
