//! CLI subcommand implementations.

pub mod add;
pub mod delete;
pub mod list;
pub mod log;
pub mod month;
pub mod rename;
pub mod show;
pub mod status;
pub mod util;
