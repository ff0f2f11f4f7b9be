//! Transcode text and send it to a Braille display.
//!
//! Demonstrates:
//! - Transcoding text to Braille cells
//! - Building a link manager and watching its status
//! - Waiting for delivery or failure
//!
//! Usage:
//!   cargo run --example send_text -- --address 192.168.4.1 "Olá 2024"
//!   cargo run --example send_text -- --address esp32.local --debug "texto"
//!   cargo run --example send_text -- --dry-run "só traduzir"

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use anyhow::{Context, bail};
use braille_link::{Error, LinkManager, LinkState, cells, transcode};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Constants
// ============================================================================

/// How long to wait for the link to open.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Time allowed for the frame to leave after the link opens.
const FLUSH_DELAY: Duration = Duration::from_millis(200);

// ============================================================================
// Args
// ============================================================================

/// Command-line arguments.
#[derive(Debug, Clone)]
struct Args {
    address: Option<String>,
    text: String,
    debug: bool,
    dry_run: bool,
}

impl Args {
    /// Parse command-line arguments.
    fn parse() -> anyhow::Result<Self> {
        let mut address = None;
        let mut words = Vec::new();
        let mut debug = false;
        let mut dry_run = false;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--address" => address = Some(args.next().context("--address needs a value")?),
                "--debug" => debug = true,
                "--dry-run" => dry_run = true,
                _ => words.push(arg),
            }
        }

        if words.is_empty() {
            bail!("usage: send_text [--address HOST] [--debug] [--dry-run] TEXT");
        }

        Ok(Self {
            address,
            text: words.join(" "),
            debug,
            dry_run,
        })
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = match Args::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e:#}");
        if e.downcast_ref::<Error>().is_some_and(Error::is_link_error) {
            eprintln!("        Check that the device is powered and on the same network.");
        }
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        "braille_link=debug"
    } else {
        "braille_link=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

async fn run(args: Args) -> anyhow::Result<()> {
    let coded = transcode(&args.text);
    let cell_count = coded.chars().count();
    println!("[Text]   {}", args.text);
    println!("[Braille] {coded}");
    for cell in cells(&args.text) {
        println!("        {cell} dots {:?}", cell.raised_dots());
    }

    if args.dry_run {
        return Ok(());
    }
    let address = args.address.context("--address is required unless --dry-run")?;

    let link = LinkManager::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .build()?;

    let (status_tx, mut status_rx) = mpsc::unbounded_channel();
    link.set_status_handler(Box::new(move |status| {
        println!("[Status] {}", status.label());
        let _ = status_tx.send(status.clone());
    }));

    link.send_transcoded(coded, &address)?;

    let outcome = timeout(CONNECT_TIMEOUT * 2, async {
        while let Some(status) = status_rx.recv().await {
            match status.state {
                LinkState::Open => return Ok(()),
                LinkState::Errored | LinkState::Closed => {
                    if let Some(err) = status.error() {
                        return Err(err);
                    }
                }
                _ => {}
            }
        }
        Ok(())
    })
    .await
    .context("device did not respond")?;
    outcome?;

    tokio::time::sleep(FLUSH_DELAY).await;
    link.close();
    println!("[Done]   {cell_count} cells sent");
    Ok(())
}
