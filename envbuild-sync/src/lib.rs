//! # envbuild-sync
//!
//! The build run: read `.env.template`, list the environment's parameters,
//! render, and write `.env` atomically.
//!
//! Call [`pipeline::run`] for a build, or [`diff_env`] to preview what a
//! build would change without touching the filesystem.

pub mod diff;
pub mod error;
pub mod pipeline;
pub mod writer;

pub use diff::{diff_env, EnvDiff};
pub use error::SyncError;
pub use pipeline::{run, BuildReport};
pub use writer::WriteResult;
