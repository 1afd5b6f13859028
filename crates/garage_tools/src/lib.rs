//! # Garage Tools
//!
//! Development tools for catalog data: validators that catch broken
//! references and out-of-range values before the data ships.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod validate;
