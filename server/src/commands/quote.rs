//! # Quote Command
//!
//! File: server/src/commands/quote.rs
//! Author: Motiv Developers
//!
//! `motiv quote` prints a random quote from the server, or a fallback line
//! when the server is unreachable.
//!
use crate::client::ApiClient;
use crate::core::config::{ClientArgs, ClientConfig};
use crate::core::error::Result;

pub async fn handle_quote(client_args: &ClientArgs) -> Result<()> {
    let config = ClientConfig::from_args(client_args)?;
    let quote = ApiClient::new(&config.server_url).fetch_quote().await;
    println!("{}", quote);
    Ok(())
}
