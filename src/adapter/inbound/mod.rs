//! Driving adapters: the HTTP API and the command line.

pub mod cli;
pub mod http;
