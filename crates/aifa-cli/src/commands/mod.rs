//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function. Commands take
//! the opened [`RecordStore`](crate::store::RecordStore) instead of opening
//! it themselves.

pub mod add;
pub mod config;
pub mod copy;
pub mod delete;
pub mod display;
pub mod download;
pub mod export;
pub mod import;
pub mod list;
pub mod search;
pub mod show;
pub mod stats;
