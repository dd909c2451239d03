//! # Motiv Services
//!
//! File: server/src/services/mod.rs
//! Author: Motiv Developers
//!
//! ## Overview
//!
//! The domain logic behind the three HTTP endpoints, kept free of any HTTP
//! framework types so it can be tested directly:
//! - `relay`: forwards prompts to the upstream chat-completion API
//! - `quotes`: the fixed quote set
//! - `share`: platform share-link construction
//!
pub mod quotes;
pub mod relay;
pub mod share;
