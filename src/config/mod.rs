//! Configuration for colorcycle runs
//!
//! Provides types and parsing for the optional `colorcycle.toml` file.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
