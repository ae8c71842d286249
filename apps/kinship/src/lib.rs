//! # kinship
//!
//! Library half of the Kinship binary: the HTTP API, the CLI and the
//! configuration file loader. `main.rs` only initialises logging and hands
//! the parsed command line to [`cli::execute`].

pub mod api;
pub mod cli;
pub mod config;
