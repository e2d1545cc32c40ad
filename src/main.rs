mod config;

use beacon_client::{BeaconClient, StatusCode};

use anyhow::{bail, Context, Result};
use structopt::StructOpt;

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

#[derive(StructOpt, Debug)]
#[structopt(name = "beaconutil", about = "Send notifications through the beacon service.")]
struct AppArgs {
    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
    Send(SendArgs),
    Figure(FigureArgs),
}

#[derive(StructOpt, Debug)]
struct ClientArgs {
    /// Access token identifying the recipient
    #[structopt(short, long)]
    token: Option<String>,
    /// Send through an alternative notification server
    #[structopt(short = "H", long)]
    host: Option<String>,
    /// Send to the local debug endpoint instead of the configured host
    #[structopt(short = "D", long)]
    debug: bool,
    /// Path to a config file, consulted after ~/.beaconrc and ./.beaconrc
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,
}

/// Send a text message
#[derive(StructOpt, Debug)]
struct SendArgs {
    #[structopt(flatten)]
    client: ClientArgs,
    /// Message to send
    #[structopt(name = "Message")]
    message: Vec<String>,
}

/// Send a PNG figure with an optional caption
#[derive(StructOpt, Debug)]
struct FigureArgs {
    #[structopt(flatten)]
    client: ClientArgs,
    /// PNG file to send
    #[structopt(name = "File", parse(from_os_str))]
    file: PathBuf,
    /// Text caption of the figure
    #[structopt(long, default_value = "")]
    caption: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = AppArgs::from_args();

    match args.cmd {
        Command::Send(args) => send(args),
        Command::Figure(args) => figure(args),
    }
}

fn send(args: SendArgs) -> Result<()> {
    let message = args.message.join(" ");

    if message.is_empty() {
        println!("Nothing to send.");
        return Ok(());
    }

    let client = build_client(&args.client)?;
    deliver(client.send_text(&message)?)
}

fn figure(args: FigureArgs) -> Result<()> {
    const MIME_ERROR_MESSAGE: &str = "couldn't determine content type from provided file";

    if !args.file.is_file() {
        bail!("{}: file not found", args.file.display());
    }

    let extension = args
        .file
        .extension()
        .and_then(|e| e.to_str())
        .context(MIME_ERROR_MESSAGE)?;

    let mime_type: mime::Mime = mime_db::lookup(extension)
        .and_then(|name| name.parse().ok())
        .context(MIME_ERROR_MESSAGE)?;

    if mime_type != mime::IMAGE_PNG {
        bail!("only png figures are supported, got {}", mime_type);
    }

    let mut image = Vec::new();
    File::open(&args.file)
        .and_then(|mut file| file.read_to_end(&mut image))
        .with_context(|| format!("unable to read {}", args.file.display()))?;

    let client = build_client(&args.client)?;
    deliver(client.send_figure(&image, &args.caption)?)
}

fn build_client(args: &ClientArgs) -> Result<BeaconClient> {
    let config = config::resolve(
        args.token.clone(),
        args.host.clone(),
        args.config.as_deref(),
        args.debug,
    )?;

    Ok(BeaconClient::new(config)?)
}

/// Map a send outcome to an exit state scripts can rely on.
fn deliver(status: Option<StatusCode>) -> Result<()> {
    match status {
        Some(status) if status == StatusCode::OK => Ok(()),
        Some(status) => bail!("server rejected the notification with status {}", status),
        None => bail!("notification could not be delivered"),
    }
}
