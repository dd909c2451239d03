//! # Ask Command
//!
//! File: server/src/commands/ask.rs
//! Author: Motiv Developers
//!
//! `motiv ask <PROMPT>` posts the prompt to the server, prints the reply and
//! appends both turns to the local transcript cache. Failed requests are
//! reported but not recorded.
//!
use crate::client::{transcript::TranscriptStore, ApiClient};
use crate::core::config::{ClientArgs, ClientConfig};
use crate::core::error::Result;
use crate::models::{AiReply, ChatMessage};
use clap::Args;
use tracing::info;

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The prompt to send.
    #[arg(required = true, num_args = 1..)]
    pub prompt: Vec<String>,

    /// Model to request instead of the server's default.
    #[arg(long, short, default_value = "")]
    pub model: String,
}

pub async fn handle_ask(args: AskArgs, client_args: &ClientArgs) -> Result<()> {
    let config = ClientConfig::from_args(client_args)?;
    let prompt = args.prompt.join(" ");
    info!("Sending prompt to {}", config.server_url);

    let client = ApiClient::new(&config.server_url);
    let reply = client.send_to_ai(&prompt, &args.model).await;

    match reply {
        AiReply {
            reply: Some(text), ..
        } => {
            println!("{}", text);
            TranscriptStore::in_dir(&config.history_dir)
                .append(&[ChatMessage::user(prompt), ChatMessage::assistant(text)]);
            Ok(())
        }
        AiReply { error, detail, .. } => {
            let error = error.unwrap_or_else(|| "Unexpected response from server".to_string());
            match detail {
                Some(detail) => anyhow::bail!("{}: {}", error, detail),
                None => anyhow::bail!("{}", error),
            }
        }
    }
}
