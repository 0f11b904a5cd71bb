//! # envbuild-renderer
//!
//! Substitutes `%TOKEN%` placeholders in a `.env.template` with quoted
//! parameter values.
//!
//! The template is scanned once; each token is resolved on its own against
//! a lookup built from the fetched parameters, so the result does not
//! depend on parameter order and inserted values are never rescanned.
//!
//! ## Usage
//!
//! ```rust
//! use envbuild_core::{Environment, Parameter};
//!
//! let env = Environment::parse("dev").unwrap();
//! let params = vec![Parameter::new("/dev/DB_HOST", "  db.internal  ")];
//! let out = envbuild_renderer::render(&env, "HOST=%DB_HOST%\nAPP=%ENV%\n", &params).unwrap();
//! assert_eq!(out, "HOST=\"db.internal\"\nAPP=\"dev\"\n");
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod token;

pub use context::{RenderContext, ENV_TOKEN};
pub use engine::{render, RenderOptions, Rendered, Renderer};
pub use error::RenderError;
pub use token::{tokenize, Segment};
