//! CLI Adapter
//!
//! Command-line interface for tokenscope.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{
    execute, render_holders, render_mint_age, validate_address, CliApp, Command, HoldersCmd,
    MintAgeCmd, SymbolCmd,
};
