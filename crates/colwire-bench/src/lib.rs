//! colwire Performance Benchmarks
//!
//! This crate contains benchmarks for the codec layers:
//! - Wire writer and reader over unversioned rows
//! - Chunk size effects on encoding and decoding
//! - Mapped versus legacy object conversion
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench -p colwire-bench
//! ```

pub mod utils;
