//! Since-when CLI library.
//!
//! This crate provides the command-line front end for the event store.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
