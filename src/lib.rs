//! discforge - HandBrakeCLI front-end
//!
//! This library crate exposes the binary's configuration and argument
//! handling for integration testing.

pub mod args;
pub mod config;
