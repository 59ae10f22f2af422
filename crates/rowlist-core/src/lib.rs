#![forbid(unsafe_code)]
//! rowlist-core: pure data shared by every rowlist crate.
//!
//! Values, schemas, strongly typed IDs, list configuration and the abstract
//! memory-tracker interface live here. Nothing in this crate allocates on
//! behalf of a container or talks to the outside world.

pub mod config;
pub mod error;
pub mod id;
pub mod prelude;
pub mod schema;
pub mod tracker;
pub mod types;
