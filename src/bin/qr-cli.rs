use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use qr_service::client::{GenerateOptions, QrClient};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "qr-cli")]
#[command(about = "Command line client for the QR code service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Health,
    /// Generate a QR code
    Generate {
        text: String,
        /// png, svg, base64 or terminal; omit for the JSON envelope
        #[arg(short, long)]
        format: Option<String>,
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        margin: Option<u32>,
        #[arg(long)]
        dark: Option<String>,
        #[arg(long)]
        light: Option<String>,
        /// Error correction level (L, M, Q, H)
        #[arg(long)]
        ecc: Option<String>,
        /// Write the body to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate a download link and save the PNG it points to
    Download {
        text: String,
        #[arg(long)]
        size: Option<u32>,
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = QrClient::new(&cli.url);

    match cli.command {
        Commands::Health => {
            let health = client.health().await?;
            print_json(&health)?;
        }
        Commands::Generate {
            text,
            format,
            size,
            margin,
            dark,
            light,
            ecc,
            output,
        } => {
            let options = GenerateOptions {
                size,
                margin,
                dark,
                light,
                ecc,
                format,
            };
            let res = client.generate_raw(&text, &options).await?;
            let is_json = res
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.starts_with("application/json"))
                .unwrap_or(false);
            let body = res.bytes().await?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &body)?;
                    eprintln!("Wrote {} bytes to {}", body.len(), path.display());
                }
                None if is_json => {
                    let json: Value = serde_json::from_slice(&body)?;
                    print_json(&json)?;
                }
                None => std::io::stdout().write_all(&body)?,
            }
        }
        Commands::Download { text, size, output } => {
            let options = GenerateOptions {
                size,
                ..Default::default()
            };
            let data = client.generate(&text, &options).await?;
            let link = data
                .download_url
                .ok_or("service response did not include a download link")?;
            let png = client.download(&link).await?;
            std::fs::write(&output, &png)?;
            eprintln!("Saved {} ({} bytes) from {}", output.display(), png.len(), link);
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
