// ABOUTME: Library module for sqldef-runner
// ABOUTME: Exports binary resolution and schema commands for the binary and tests

pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod platform;
pub mod release;
pub mod schema;
pub mod tool;
pub mod utils;

pub use cache::BinaryCache;
pub use error::{Result, SqldefError};
pub use platform::Platform;
pub use schema::{ConnectionParams, Mode};
pub use tool::Tool;
