//! Library side of the `roster` command: configuration, logging and the
//! pipeline stages the subcommands are built from.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
