//! # Motiv Command Modules
//!
//! File: server/src/commands/mod.rs
//! Author: Motiv Developers
//!
//! ## Overview
//!
//! One module per top-level subcommand. Each defines its argument struct and
//! a `handle_*` function that `main.rs` dispatches to.
//!
//! - `serve`: the HTTP backend
//! - `ask`, `quote`, `share`: client calls against a running server
//! - `history`: the local transcript cache
//!

/// `motiv ask`: send a prompt and record the exchange.
pub mod ask;
/// `motiv history`: print or clear the transcript cache.
pub mod history;
/// `motiv quote`: print a random quote.
pub mod quote;
/// `motiv serve`: run the HTTP server.
pub mod serve;
/// `motiv share`: print a share link.
pub mod share;
