//! # Motiv Core Infrastructure
//!
//! File: server/src/core/mod.rs
//! Author: Motiv Developers
//!
//! ## Overview
//!
//! Foundational pieces used by every command:
//! - `config`: client-side settings (server URL, transcript cache location)
//! - `error`: the `MotivError` enum and the crate-wide `Result` alias
//!
pub mod config;
pub mod error;
