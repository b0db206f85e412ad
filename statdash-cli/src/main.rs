//! Statdash CLI: yearly statistics from the command line.
//!
//! Commands:
//! - `range`: observed year range and record count
//! - `summary`: mean publishers, studies and memorial attendance
//! - `table`: the display table as aligned text
//! - `chart`: the chart description as JSON
//! - `export`: write the filtered table as CSV

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use statdash_core::chart::{ChartMode, Theme};
use statdash_core::config::DashboardConfig;
use statdash_core::domain::Year;
use statdash_core::export::save_csv;
use statdash_core::{Dashboard, RenderOutput, RenderRequest, YearRange};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "statdash",
    version,
    about = "Statdash CLI: yearly publishers, studies and memorial attendance"
)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database path (overrides the config).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
struct RangeArgs {
    /// First year to include. Defaults to the earliest stored year.
    #[arg(long)]
    from: Option<Year>,

    /// Last year to include. Defaults to the latest stored year.
    #[arg(long)]
    to: Option<Year>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the observed year range and record count.
    Range,
    /// Print mean publishers, studies and memorial attendance (millions).
    Summary {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Print the display table.
    Table {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Print the chart description as JSON.
    Chart {
        #[command(flatten)]
        range: RangeArgs,

        /// composition or trend.
        #[arg(long)]
        mode: Option<ChartMode>,

        /// dark or light.
        #[arg(long)]
        theme: Option<Theme>,

        /// Years to mark on the composition chart (repeatable).
        #[arg(long = "highlight", num_args = 1..)]
        highlights: Vec<Year>,

        /// Write JSON here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write the filtered table as CSV.
    Export {
        #[command(flatten)]
        range: RangeArgs,

        /// Output directory. Defaults to the current directory.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref(), cli.db)?;
    let store = config.store.open_store();
    let dashboard = Dashboard::load(&store)
        .with_context(|| format!("loading {}", store.path().display()))?;
    debug!(rows = dashboard.records().len(), "dashboard loaded");

    match cli.command {
        Commands::Range => run_range(&dashboard),
        Commands::Summary { range } => {
            let out = render(&dashboard, &config, &range, None, None, None)?;
            print_summary(&out);
            Ok(())
        }
        Commands::Table { range } => {
            let out = render(&dashboard, &config, &range, None, None, None)?;
            print!("{}", out.table.render_text());
            Ok(())
        }
        Commands::Chart {
            range,
            mode,
            theme,
            highlights,
            out,
        } => {
            let highlights = (!highlights.is_empty()).then_some(highlights);
            let rendered = render(&dashboard, &config, &range, mode, theme, highlights)?;
            let json = rendered
                .chart
                .to_json()
                .context("failed to serialize chart")?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Chart written to: {}", path.display());
                }
                None => println!("{json}"),
            }
            Ok(())
        }
        Commands::Export { range, out_dir } => {
            let out = render(&dashboard, &config, &range, None, None, None)?;
            run_export(&out, &out_dir)
        }
    }
}

fn load_config(path: Option<&Path>, db: Option<PathBuf>) -> Result<DashboardConfig> {
    let mut config = match path {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(db) = db {
        config.store.path = db;
    }
    Ok(config)
}

fn request_for(
    dashboard: &Dashboard,
    config: &DashboardConfig,
    args: &RangeArgs,
    mode: Option<ChartMode>,
    theme: Option<Theme>,
    highlights: Option<Vec<Year>>,
) -> Result<RenderRequest> {
    let observed = dashboard.observed_range();
    let mut request = RenderRequest::from_view(&config.view, observed);

    if args.from.is_some() || args.to.is_some() {
        let base = request.range.or(observed);
        let min = args.from.or(base.map(|r| r.min));
        let max = args.to.or(base.map(|r| r.max));
        request.range = match (min, max) {
            (Some(min), Some(max)) => Some(YearRange::new(min, max)),
            _ => None,
        };
    }
    if let Some(range) = request.range {
        if range.is_inverted() {
            bail!("year range {range} is inverted");
        }
    }

    if let Some(mode) = mode {
        request.mode = mode;
    }
    if let Some(theme) = theme {
        request.theme = theme;
    }
    if let Some(highlights) = highlights {
        request.highlight_years = highlights;
    }
    Ok(request)
}

fn render(
    dashboard: &Dashboard,
    config: &DashboardConfig,
    args: &RangeArgs,
    mode: Option<ChartMode>,
    theme: Option<Theme>,
    highlights: Option<Vec<Year>>,
) -> Result<RenderOutput> {
    let request = request_for(dashboard, config, args, mode, theme, highlights)?;
    Ok(dashboard.render(&request))
}

fn run_range(dashboard: &Dashboard) -> Result<()> {
    match dashboard.observed_range() {
        Some(range) => {
            println!("Years: {range}");
            println!("Records: {}", dashboard.records().len());
        }
        None => println!("No records in store"),
    }
    Ok(())
}

fn fmt_mean(v: Option<f64>) -> String {
    v.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}M"))
}

fn print_summary(out: &RenderOutput) {
    match out.range {
        Some(range) => println!("Range: {range} ({} records)", out.summary.record_count),
        None => println!("Range: (empty)"),
    }
    for (label, value) in out.summary.entries() {
        println!("  {:<28} {:>10}", label, fmt_mean(value));
    }
}

fn run_export(out: &RenderOutput, dir: &Path) -> Result<()> {
    let path = save_csv(&out.filtered, dir).context("failed to export CSV")?;
    println!("Exported {} rows to: {}", out.filtered.len(), path.display());
    Ok(())
}
