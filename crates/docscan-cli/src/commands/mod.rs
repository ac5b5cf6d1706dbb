//! CLI subcommands.

pub mod batch;
pub mod classify;
pub mod config;
pub mod scan;
