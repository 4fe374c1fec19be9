use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use svglinkify::{linkify_svg, EngineConfig, LinkifyOptions, PatchMode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "svglinkify",
    about = "Convert an SVG drawing to PDF with its hyperlinks preserved",
    version,
    author
)]
struct Cli {
    /// Input SVG file
    input: PathBuf,

    /// Output PDF file
    output: PathBuf,

    /// Inkscape executable used for rendering
    #[arg(long, value_name = "PATH", default_value = "inkscape")]
    inkscape_path: PathBuf,

    /// Resolution for rasterized content in the exported PDF
    #[arg(long, value_name = "N", default_value_t = 96)]
    dpi: u32,

    /// Patch a temporary copy and rename it over the output
    #[arg(long)]
    atomic: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> LinkifyOptions {
        LinkifyOptions {
            engine: EngineConfig::new(&self.inkscape_path).with_export_dpi(self.dpi),
            mode: if self.atomic {
                PatchMode::Atomic
            } else {
                PatchMode::InPlace
            },
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "warn,svglinkify=info",
        _ => "warn,svglinkify=debug",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!(
        input = %cli.input.display(),
        output = %cli.output.display(),
        engine = %cli.inkscape_path.display(),
        dpi = cli.dpi,
        atomic = cli.atomic,
        "starting conversion"
    );

    let summary = linkify_svg(&cli.input, &cli.output, &cli.options()).with_context(|| {
        format!(
            "failed to linkify {} into {}",
            cli.input.display(),
            cli.output.display()
        )
    })?;

    println!(
        "Added {} of {} links to {}",
        summary.update.annotation_count,
        summary.links_found,
        cli.output.display()
    );
    Ok(())
}
