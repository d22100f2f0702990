use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use ekilirelay_client::http::client::{Builder, Error};
use ekilirelay_core::email::ApiResponse;
use ekilirelay_core::upload::FileUpload;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Send emails and upload files through the Ekili Relay service"
)]
struct Opts {
    /// The Relay API key.
    #[arg(long, env = "EKILIRELAY_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info", env = "EKILIRELAY_LOG_LEVEL")]
    log_level: String,

    /// Total per-request timeout, in seconds.
    #[arg(long, default_value_t = 60, env = "EKILIRELAY_TIMEOUT_SECS")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send a single email.
    Send {
        #[arg(long)]
        to: String,

        #[arg(long)]
        subject: String,

        #[arg(long)]
        message: String,

        /// Extra header lines passed through to the relay.
        #[arg(long)]
        headers: Option<String>,
    },
    /// Upload a single file to Relay storage.
    Upload {
        path: PathBuf,

        #[arg(long)]
        mime_type: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&opts.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .init();

    let client = Builder::new(&opts.api_key)
        .timeout(Duration::from_secs(opts.timeout_secs))
        .build()
        .map_err(raised)?;

    let result = match opts.command {
        Command::Send {
            to,
            subject,
            message,
            headers,
        } => {
            info!(%to, "sending email");
            client
                .send_email(&to, &subject, &message, headers.as_deref())
                .await
                .map_err(raised)?
        }
        Command::Upload { path, mime_type } => {
            let content = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("upload")
                .to_string();

            let mut file = FileUpload::new(file_name, content);
            if let Some(mime_type) = mime_type {
                file = file.with_mime_type(mime_type);
            }
            info!(file_name = %file.file_name, bytes = file.len(), "uploading file");
            client.send_file(file).await
        }
    };

    report(&result)
}

fn report(result: &ApiResponse) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    if !result.is_success() {
        bail!(
            "relay reported an error: {}",
            result.message.as_deref().unwrap_or("no message")
        );
    }
    Ok(())
}

fn raised(err: Error) -> anyhow::Error {
    match err.status_code() {
        Some(status_code) => anyhow::Error::new(err).context(format!("status {status_code}")),
        None => anyhow::Error::new(err),
    }
}
