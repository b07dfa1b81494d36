//! The tools module provides helper functions for huffzip.
//!
//! The tools are:
//! - cli: Command line interface for huffzip.
//! - freq_count: Byte frequency count, the first of the compressor's two passes.
//!
pub mod cli;
pub mod freq_count;
