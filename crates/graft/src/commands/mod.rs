//! CLI subcommands.

pub mod apply;
pub mod show;
