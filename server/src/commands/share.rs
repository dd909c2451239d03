//! # Share Command
//!
//! File: server/src/commands/share.rs
//! Author: Motiv Developers
//!
//! `motiv share <PLATFORM> [--text ..] [--url ..]` prints a share link built
//! by the server.
//!
use crate::client::ApiClient;
use crate::core::config::{ClientArgs, ClientConfig};
use crate::core::error::Result;
use clap::Args;

#[derive(Args, Debug)]
pub struct ShareArgs {
    /// Target platform: facebook (fb), twitter, instagram (ig) or tiktok.
    /// Any other name returns `--url` unchanged.
    pub platform: String,

    /// Text to pre-fill.
    #[arg(long, short)]
    pub text: Option<String>,

    /// Link to share.
    #[arg(long, short)]
    pub url: Option<String>,
}

pub async fn handle_share(args: ShareArgs, client_args: &ClientArgs) -> Result<()> {
    let config = ClientConfig::from_args(client_args)?;
    let reply = ApiClient::new(&config.server_url)
        .share_link(&args.platform, args.text.as_deref(), args.url.as_deref())
        .await;

    match (reply.share_url, reply.error) {
        (Some(share_url), _) => {
            println!("{}", share_url);
            Ok(())
        }
        (None, Some(error)) => anyhow::bail!("{}", error),
        (None, None) => anyhow::bail!("Unexpected response from server"),
    }
}
