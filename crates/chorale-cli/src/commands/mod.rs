//! CLI subcommands.

pub mod devices;
pub mod modes;
pub mod run;
