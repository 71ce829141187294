//! # colwire-test
//!
//! Integration tests for colwire.
//!
//! This crate contains:
//! - Sample mapped types and their field maps
//! - Random workload generators for rows, rowsets and objects
//! - Chunk re-splitting helpers

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Sample mapped types.
pub mod fixtures;

/// Workload generators.
pub mod workload;
