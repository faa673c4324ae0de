use std::{fs, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use qrfield::{
    EncodingConfig, ImageFormat, RecoveryLevel, Snapshot, encode_symbol, finish, is_prerendered,
    raw_image, render_field, snapshot_entries,
};

#[derive(Parser, Debug)]
#[command(name = "qrfield", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the viewer fragment for a record snapshot.
    Render(RenderArgs),
    /// Encode one payload and print its image markup.
    Encode(EncodeArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input snapshot JSON (record, optional root/languages/actor, field
    /// configuration).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the entry sequence as JSON instead of the HTML fragment.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Payload text.
    #[arg(long)]
    text: String,

    /// Image format.
    #[arg(long, default_value = "svg")]
    format: ImageFormat,

    /// Emit inline SVG markup instead of a base64 data URI.
    #[arg(long, default_value_t = false)]
    markup: bool,

    /// Error-correction level (L, M, Q or H).
    #[arg(long, default_value = "L")]
    recovery: RecoveryLevel,

    /// Output path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Encode(args) => cmd_encode(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let raw = fs::read_to_string(&args.in_path)
        .with_context(|| format!("read snapshot '{}'", args.in_path.display()))?;
    let snapshot = Snapshot::from_json(&raw)
        .with_context(|| format!("parse snapshot '{}'", args.in_path.display()))?;

    let output = if args.json {
        let entries = snapshot_entries(&snapshot)?;
        serde_json::to_string_pretty(&entries)?
    } else {
        render_field(&snapshot)?.to_html()
    };

    write_output(args.out.as_deref(), &output)
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let config = EncodingConfig {
        format: args.format,
        markup: args.markup,
        recovery: args.recovery,
    };
    let data = if is_prerendered(&args.text) {
        args.text.clone()
    } else {
        let symbol = encode_symbol(&args.text, config.recovery.ordinal())?;
        raw_image(&symbol, config)?
    };
    let output = finish(&data, &args.text, config);
    write_output(args.out.as_deref(), &output)
}

fn write_output(out: Option<&std::path::Path>, output: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            fs::write(path, output)
                .with_context(|| format!("write output '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{output}"),
    }
    Ok(())
}
