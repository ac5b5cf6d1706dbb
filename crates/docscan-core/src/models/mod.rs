//! Data models for docscan.

pub mod capture;
pub mod config;
pub mod text;
