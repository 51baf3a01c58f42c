//! micro-gen CLI library
//!
//! File-system side of the generator: loading inputs, formatting with
//! `gofmt`, writing artifacts under their regeneration policy and dry-run
//! diffs.

#![allow(clippy::multiple_crate_versions)]

pub mod diff;
pub mod gofmt;
pub mod observability;
pub mod project;
pub mod writer;

pub use diff::FileChange;
pub use gofmt::GofmtFormatter;
pub use project::ProjectSession;
pub use writer::{ProjectWriter, WriteReport};
