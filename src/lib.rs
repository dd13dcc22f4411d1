//! IntelliSQL - ask a SQLite database questions in plain English.
//!
//! Questions are translated into SQL by an LLM, executed against a
//! local SQLite database, and logged in a session history. The binary
//! wires these modules into a REPL; integration tests drive them
//! through this library crate.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod history;
pub mod llm;
pub mod pipeline;
pub mod render;
pub mod repl;
pub mod safety;
