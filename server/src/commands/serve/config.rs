//! # Motiv Server Configuration
//!
//! File: server/src/commands/serve/config.rs
//! Author: Motiv Developers
//!
//! ## Overview
//!
//! This module builds the effective configuration for `motiv serve`. It
//! combines settings from:
//! 1. Command-line arguments and their environment variables (highest priority)
//! 2. A `.motiv.toml` file in the served directory (if present)
//! 3. Default values (lowest priority)
//!
//! Environment variables are read through clap's `env` support, after `main`
//! has loaded any `.env` file with `dotenvy`:
//!
//! | Flag               | Variable         | Default                                       |
//! |--------------------|------------------|-----------------------------------------------|
//! | `--port`           | `PORT`           | `3000`                                        |
//! | `--model`          | `MODEL`          | `gpt-4o-mini`                                 |
//! | `--api-url`        | `AI_API_URL`     | `https://api.openai.com/v1/chat/completions`  |
//! | `--openai-api-key` | `OPENAI_API_KEY` | unset                                         |
//! | `--groq-api-key`   | `GROQ_API_KEY`   | unset                                         |
//!
//! API keys are never read from `.motiv.toml`: it sits next to publicly
//! served files.
//!
//! ## Examples
//!
//! Configuration file format:
//!
//! ```toml
//! port = 8080
//! host = "127.0.0.1"
//! directory = "public"
//! enable_cors = false
//! model = "llama3-8b-8192"
//! api_url = "https://api.groq.com/openai/v1/chat/completions"
//! max_tokens = 300
//! ```
//!
use crate::core::error::{MotivError, Result};
use crate::services::relay::{
    Credential, RelayConfig, DEFAULT_API_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
};
use anyhow::{anyhow, Context};
use clap::Parser;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// The expected name for the server configuration file.
pub const CONFIG_FILE_NAME: &str = ".motiv.toml";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// # Serve Command Arguments (`ServeArgs`)
///
/// Command-line arguments accepted by `motiv serve`. Most of them can also be
/// supplied through environment variables.
#[derive(Parser)]
pub struct ServeArgs {
    /// Directory whose files are served for non-API paths.
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Port to listen on. The next free port is used if it is taken.
    #[arg(long, short, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind to. `0.0.0.0` accepts connections on all interfaces.
    #[arg(long, default_value_t = DEFAULT_HOST)]
    pub host: IpAddr,

    /// Disable CORS headers (enabled and permissive by default).
    #[arg(long)]
    pub no_cors: bool,

    /// Model used when a request does not name one.
    #[arg(long, short, env = "MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// OpenAI-compatible chat-completion endpoint.
    #[arg(long, env = "AI_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Upper bound on tokens generated per reply.
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Primary API key.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Fallback API key, used only when no OpenAI key is set.
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub groq_api_key: Option<String>,
}

// Written by hand so `-vv` logging of the parsed CLI never prints the API keys.
impl fmt::Debug for ServeArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only reveal whether a key was given, never its value.
        let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("ServeArgs")
            .field("directory", &self.directory)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("no_cors", &self.no_cors)
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("max_tokens", &self.max_tokens)
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("groq_api_key", &redact(&self.groq_api_key))
            .finish()
    }
}

/// # Effective Server Configuration (`ServerConfig`)
///
/// The consolidated settings after merging arguments, the config file and
/// defaults. `directory` is absolute and known to exist once
/// [`load_and_merge_config`] returns.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: IpAddr,
    pub directory: PathBuf,
    pub enable_cors: bool,
    pub relay: RelayConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST,
            directory: PathBuf::from("."),
            enable_cors: true,
            relay: RelayConfig::default(),
        }
    }
}

/// Optional overrides read from `.motiv.toml`.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    port: Option<u16>,
    host: Option<String>,
    directory: Option<String>,
    enable_cors: Option<bool>,
    model: Option<String>,
    api_url: Option<String>,
    max_tokens: Option<u32>,
}

/// # Load and Merge Server Configuration (`load_and_merge_config`)
///
/// Starts from the arguments, applies `.motiv.toml` (looked up in the
/// requested directory) wherever an argument was left at its default, then
/// resolves the served directory and validates the result.
///
/// ## Errors
///
/// Returns an error if:
/// - The config file exists but cannot be read or parsed.
/// - The final directory does not exist or is not a directory.
/// - `max_tokens` is zero or the upstream URL is empty.
pub async fn load_and_merge_config(args: ServeArgs) -> Result<ServerConfig> {
    // Start with the arguments (which already include environment variables).
    let mut config = ServerConfig::from_args(&args);

    // The config file lives in the directory being served.
    let search_dir = if args.directory.is_absolute() {
        args.directory.clone()
    } else {
        env::current_dir()
            .context("Failed to get current working directory")?
            .join(&args.directory)
    };
    debug!("Looking for config file in: {}", search_dir.display());

    if let Some(file_config) = load_config_from_dir(&search_dir)? {
        // A file value applies only where the argument is still at its default.
        if args.port == DEFAULT_PORT {
            if let Some(port) = file_config.port {
                config.port = port;
            }
        }
        if args.host == DEFAULT_HOST {
            if let Some(host) = file_config.host.as_deref() {
                match host.parse() {
                    Ok(ip) => config.host = ip,
                    Err(e) => warn!(
                        "Invalid host IP '{}' in {} ({}), keeping {}",
                        host, CONFIG_FILE_NAME, e, config.host
                    ),
                }
            }
        }
        // `--no-cors` always wins over the file.
        if !args.no_cors {
            if let Some(enable_cors) = file_config.enable_cors {
                config.enable_cors = enable_cors;
            }
        }
        if args.model == DEFAULT_MODEL {
            if let Some(model) = file_config.model {
                config.relay.default_model = model;
            }
        }
        if args.api_url == DEFAULT_API_URL {
            if let Some(api_url) = file_config.api_url {
                config.relay.api_url = api_url;
            }
        }
        if args.max_tokens == DEFAULT_MAX_TOKENS {
            if let Some(max_tokens) = file_config.max_tokens {
                config.relay.max_tokens = max_tokens;
            }
        }
        // A relative directory in the file is relative to the file itself.
        if let Some(directory) = file_config.directory {
            let directory = PathBuf::from(directory);
            config.directory = if directory.is_relative() {
                search_dir.join(directory)
            } else {
                directory
            };
        }
    } else {
        debug!("No {} found. Using arguments only.", CONFIG_FILE_NAME);
    }

    // Make the directory absolute and check it exists, then sanity-check the rest.
    config.resolve_directory().await?;
    validate_config(&config)?;
    Ok(config)
}

/// Reads `.motiv.toml` from `search_dir`. A missing file is `Ok(None)`.
fn load_config_from_dir(search_dir: &Path) -> Result<Option<FileConfig>> {
    let config_path = search_dir.join(CONFIG_FILE_NAME);
    // No file is the common case, not an error.
    if !config_path.is_file() {
        return Ok(None);
    }

    info!("Loading configuration from {}", config_path.display());
    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let file_config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;
    Ok(Some(file_config))
}

fn validate_config(config: &ServerConfig) -> Result<()> {
    if config.relay.max_tokens == 0 {
        return Err(anyhow!(MotivError::Config(
            "max_tokens must be greater than zero.".to_string()
        )));
    }
    if config.relay.api_url.trim().is_empty() {
        return Err(anyhow!(MotivError::Config(
            "The chat-completion API URL cannot be empty.".to_string()
        )));
    }
    Ok(())
}

impl ServerConfig {
    /// Builds a configuration from the arguments alone.
    fn from_args(args: &ServeArgs) -> Self {
        Self {
            port: args.port,
            host: args.host,
            directory: args.directory.clone(),
            enable_cors: !args.no_cors,
            relay: RelayConfig {
                credential: Credential::resolve(
                    args.openai_api_key.as_deref(),
                    args.groq_api_key.as_deref(),
                ),
                default_model: args.model.clone(),
                api_url: args.api_url.clone(),
                max_tokens: args.max_tokens,
            },
        }
    }

    /// Makes `directory` absolute and canonical, failing if it is not an existing directory.
    async fn resolve_directory(&mut self) -> Result<()> {
        // Relative paths are relative to the current working directory.
        let absolute_path = if self.directory.is_absolute() {
            self.directory.clone()
        } else {
            env::current_dir()
                .context("Failed to get current working directory")?
                .join(&self.directory)
        };

        // Canonicalize resolves `..` and symlinks, and fails if the path is missing.
        let canonical_path = tokio::fs::canonicalize(&absolute_path)
            .await
            .with_context(|| {
                format!(
                    "Directory '{}' could not be found or accessed",
                    absolute_path.display()
                )
            })?;
        let metadata = tokio::fs::metadata(&canonical_path)
            .await
            .with_context(|| format!("Failed to get metadata for '{}'", canonical_path.display()))?;
        // A file cannot be served as a directory root.
        if !metadata.is_dir() {
            anyhow::bail!("Path is not a directory: {}", canonical_path.display());
        }

        self.directory = canonical_path;
        debug!("Resolved serving directory to: {}", self.directory.display());
        Ok(())
    }
}

// --- Unit Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::relay::CredentialSource;
    use tempfile::TempDir;

    fn args_for(directory: PathBuf) -> ServeArgs {
        ServeArgs {
            directory,
            port: DEFAULT_PORT,
            host: DEFAULT_HOST,
            no_cors: false,
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            openai_api_key: None,
            groq_api_key: None,
        }
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert!(config.enable_cors);
        assert_eq!(config.relay.default_model, "gpt-4o-mini");
        assert!(config.relay.credential.is_none());
    }

    #[test]
    fn test_from_args_resolves_credential() {
        let mut args = args_for(PathBuf::from("."));
        args.groq_api_key = Some("gsk-1".into());
        args.no_cors = true;

        let config = ServerConfig::from_args(&args);
        assert!(!config.enable_cors);
        let credential = config.relay.credential.expect("credential");
        assert_eq!(credential.source, CredentialSource::Groq);

        args.openai_api_key = Some("sk-1".into());
        let config = ServerConfig::from_args(&args);
        assert_eq!(
            config.relay.credential.map(|c| c.source),
            Some(CredentialSource::OpenAi)
        );
    }

    #[test]
    fn test_serve_args_debug_redacts_keys() {
        let mut args = args_for(PathBuf::from("."));
        args.openai_api_key = Some("sk-very-secret".into());
        args.groq_api_key = Some("gsk-very-secret".into());

        let printed = format!("{:?}", args);
        assert!(!printed.contains("very-secret"));
        assert!(printed.contains("openai_api_key: Some(\"<redacted>\")"));
        assert!(printed.contains("max_tokens: 500"));

        args.groq_api_key = None;
        assert!(format!("{:?}", args).contains("groq_api_key: None"));
    }

    #[tokio::test]
    async fn test_load_config_from_dir_no_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        assert!(load_config_from_dir(temp_dir.path())?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_load_config_rejects_unknown_fields() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "openai_api_key = \"sk-leaked\"\n",
        )?;
        let err = load_config_from_dir(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_and_merge_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let public = temp_dir.path().join("public");
        fs::create_dir(&public)?;
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"
            port = 9090
            host = "127.0.0.1"
            directory = "public"
            enable_cors = false
            model = "llama3-8b-8192"
            api_url = "https://api.groq.com/openai/v1/chat/completions"
            max_tokens = 256
            "#,
        )?;

        let config = load_and_merge_config(args_for(temp_dir.path().to_path_buf())).await?;

        assert_eq!(config.port, 9090);
        assert_eq!(config.host.to_string(), "127.0.0.1");
        assert!(!config.enable_cors);
        assert_eq!(config.relay.default_model, "llama3-8b-8192");
        assert_eq!(
            config.relay.api_url,
            "https://api.groq.com/openai/v1/chat/completions"
        );
        assert_eq!(config.relay.max_tokens, 256);
        assert_eq!(config.directory, fs::canonicalize(&public)?);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_and_merge_cli_overrides_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "port = 9090\nmodel = \"from-file\"\nenable_cors = true\n",
        )?;

        let mut args = args_for(temp_dir.path().to_path_buf());
        args.port = 4000;
        args.model = "from-cli".into();
        args.no_cors = true;

        let config = load_and_merge_config(args).await?;
        assert_eq!(config.port, 4000);
        assert_eq!(config.relay.default_model, "from-cli");
        assert!(!config.enable_cors);
        assert_eq!(config.directory, fs::canonicalize(temp_dir.path())?);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_and_merge_rejects_zero_max_tokens() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let mut args = args_for(temp_dir.path().to_path_buf());
        args.max_tokens = 0;

        let err = load_and_merge_config(args).await.unwrap_err();
        assert!(err.to_string().contains("max_tokens"));
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_directory_nonexistent() {
        let mut config = ServerConfig {
            directory: PathBuf::from("/path/that/definitely/does/not/exist"),
            ..ServerConfig::default()
        };
        assert!(config.resolve_directory().await.is_err());
    }

    #[tokio::test]
    async fn test_resolve_directory_rejects_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let file_path = temp_dir.path().join("index.html");
        fs::write(&file_path, "<html></html>")?;

        let mut config = ServerConfig {
            directory: file_path,
            ..ServerConfig::default()
        };
        let err = config.resolve_directory().await.unwrap_err();
        assert!(err.to_string().contains("not a directory"));
        Ok(())
    }
}
