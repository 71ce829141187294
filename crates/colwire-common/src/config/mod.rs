//! Configuration for colwire.
//!
//! This module provides configuration structures for the wire codec.

mod wire;

pub use wire::WireConfig;
