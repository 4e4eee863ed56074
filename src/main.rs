//! loci - sample and render the curve gallery from the command line.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use loci::catalog::DEFAULT_CURVE;
use loci::math::Viewport;
use loci::render::svg::{DEFAULT_PRECISION, MAX_PRECISION};
use loci::render::{path_data, points_attribute, StrokeStyle, SvgDocument, SvgOptions};
use loci::{CurveCatalog, SampleParams};

#[derive(Parser, Debug)]
#[command(name = "loci")]
#[command(about = "Sample and render parametric and polar curves", long_about = None)]
struct Cli {
    /// Log sampling details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the gallery in menu order
    List,
    /// Show a curve's metadata
    Show {
        /// Curve id, e.g. `astroid`
        id: String,
    },
    /// Sample a curve and write it out
    Render(RenderArgs),
}

#[derive(clap::Args, Debug)]
struct RenderArgs {
    /// Curve id
    #[arg(default_value = DEFAULT_CURVE)]
    id: String,

    /// Side length of the square viewport
    #[arg(long, default_value_t = Viewport::DEFAULT_SIZE)]
    viewport: f64,

    /// Parameter step between samples
    #[arg(long, default_value_t = SampleParams::DEFAULT_STEP)]
    step: f64,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Significant digits for coordinates
    #[arg(
        long,
        default_value_t = DEFAULT_PRECISION,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PRECISION))
    )]
    precision: u32,

    /// Omit the draw-on animation from SVG output
    #[arg(long)]
    no_animate: bool,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    /// Standalone SVG document
    Svg,
    /// SVG path `d` attribute
    Path,
    /// Polyline `points` attribute
    Points,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = CurveCatalog::gallery();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::List => list(&catalog, &mut out)?,
        Command::Show { id } => show(&catalog, &id, &mut out)?,
        Command::Render(args) => match &args.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                let mut writer = BufWriter::new(file);
                render(&catalog, &args, &mut writer)?;
                writer.flush()?;
                tracing::info!(path = %path.display(), "wrote {}", args.id);
            }
            None => render(&catalog, &args, &mut out)?,
        },
    }
    Ok(())
}

/// Default: WARN for everything, INFO for loci; `--verbose` raises loci to DEBUG.
/// Further directives can be given through `RUST_LOG`.
fn init_logging(verbose: bool) {
    let level = if verbose { "loci=debug" } else { "loci=info" };
    let env_filter = EnvFilter::from_default_env()
        .add_directive(LevelFilter::WARN.into())
        .add_directive(level.parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn list<W: Write>(catalog: &CurveCatalog, out: &mut W) -> Result<()> {
    for (id, curve) in catalog.entries() {
        writeln!(out, "{id:<20} {:<11} {}", curve.kind(), curve.title())?;
    }
    Ok(())
}

fn show<W: Write>(catalog: &CurveCatalog, id: &str, out: &mut W) -> Result<()> {
    let curve = catalog.lookup(id)?;
    let domain = curve.domain();
    let path = catalog
        .sample_with(id, SampleParams::default())
        .with_context(|| format!("failed to sample {id}"))?;

    writeln!(out, "id:        {id}")?;
    writeln!(out, "title:     {}", curve.title())?;
    writeln!(out, "kind:      {}", curve.kind())?;
    writeln!(out, "domain:    [{}, {}]", domain.t_min, domain.t_max)?;
    writeln!(out, "equation:  {}", curve.equation())?;
    writeln!(out, "samples:   {}", path.len())?;
    writeln!(out, "subpaths:  {}", path.subpaths().count())?;
    writeln!(out, "length:    {:.1}", path.length())?;
    if let Some(stated) = curve.path_length() {
        writeln!(out, "stated:    {stated}")?;
    }
    Ok(())
}

fn render<W: Write>(catalog: &CurveCatalog, args: &RenderArgs, out: &mut W) -> Result<()> {
    let curve = catalog.lookup(&args.id)?;
    let path = catalog
        .sample(&args.id, args.viewport, args.step)
        .with_context(|| format!("failed to sample {}", args.id))?;
    tracing::debug!(
        curve = %args.id,
        commands = path.len(),
        pen_lifts = path.pen_lifts(),
        "sampled"
    );

    match args.format {
        Format::Svg => {
            let options = SvgOptions {
                precision: args.precision,
                animate: !args.no_animate,
            };
            SvgDocument::new(&path, args.viewport, StrokeStyle::for_kind(curve.kind()))?
                .with_title(curve.title())
                .with_options(options)?
                .write_io(out)?;
        }
        Format::Path => writeln!(out, "{}", path_data(&path, args.precision))?,
        Format::Points => writeln!(out, "{}", points_attribute(&path, args.precision))?,
    }
    Ok(())
}
