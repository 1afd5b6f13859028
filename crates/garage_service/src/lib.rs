//! # Garage Service
//!
//! The external-collaborator boundary around `garage_core`:
//!
//! - [`loader`] - RON catalog files to registries, with load-time validation
//! - [`persist`] - best-effort, fire-and-forget snapshot persistence
//!
//! The core stays pure; everything that touches the filesystem or a runtime
//! lives here.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod loader;
pub mod persist;
