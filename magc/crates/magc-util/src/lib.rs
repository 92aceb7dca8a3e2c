//! magc-util - Shared foundation types for the magicate pipeline.
//!
//! This crate holds the types every phase of the rewriter depends on:
//!
//! - [`Span`] - a byte range into the source buffer
//! - [`ErrorCode`] - the pipeline-wide error taxonomy
//! - [`diagnostic`] - rendering of user-facing error reports
//!
//! The pipeline is single-threaded and processes one file at a time, so
//! nothing in here carries locks or interior mutability.

mod errcode;
mod span;

pub mod diagnostic;

pub use errcode::ErrorCode;
pub use span::Span;

// Re-export commonly used hash types
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
