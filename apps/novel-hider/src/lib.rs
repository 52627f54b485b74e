//! # novel-hider
//!
//! Operator console for the Novel Hider record store: the clap CLI and the
//! site configuration loader. The binary in `main.rs` is a thin wrapper.

pub mod cli;
pub mod config;
