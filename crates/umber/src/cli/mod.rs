//! Command implementations for the Umber CLI.

pub mod config;
pub mod run;
