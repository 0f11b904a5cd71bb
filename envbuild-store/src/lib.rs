//! # envbuild-store
//!
//! Lists every parameter under an environment's namespace path, following
//! continuation cursors until the store has nothing more to return.
//!
//! ```rust,no_run
//! use envbuild_core::Environment;
//! use envbuild_store::{fetch_parameters, SsmStore};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SsmStore::from_env(None, false).await;
//! let env = Environment::parse("dev")?;
//! let params = fetch_parameters(&store, &env, 500).await?;
//! println!("{} parameters", params.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod fetch;
pub mod memory;
pub mod ssm;

pub use error::StoreError;
pub use fetch::{fetch_parameters, BoxFuture, Page, ParameterStore};
pub use memory::MemoryStore;
pub use ssm::SsmStore;
