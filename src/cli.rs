//! Command-line interface components.

use crate::config::{ArgoConfig, DataRoot};
use crate::error::Result;
use crate::models::{Aggregate, FloatRecord, SourceKind};
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "argo")]
#[command(about = "Aggregate Argo float profile CSV files into per-float cycle histories")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Core profile root (repeatable; replaces configured roots)
    #[arg(long = "core", value_name = "DIR")]
    pub core_roots: Vec<PathBuf>,

    /// Biogeochemical profile root (repeatable; replaces configured roots)
    #[arg(long = "bgc", value_name = "DIR")]
    pub bgc_roots: Vec<PathBuf>,

    /// Show a single float instead of the whole aggregate
    #[arg(long = "float", value_name = "ID")]
    pub float_id: Option<String>,

    /// Emit the capped transport view as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Most recent history entries per float in JSON output (0 = all)
    #[arg(long, value_name = "N")]
    pub history_limit: Option<usize>,

    /// Points per cycle in JSON output (0 = all)
    #[arg(long, value_name = "N")]
    pub cycle_limit: Option<usize>,

    /// Show a progress bar while ingesting
    #[arg(long)]
    pub progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Build configuration: config file (or defaults), then command-line overrides
    pub fn load_config(&self) -> Result<ArgoConfig> {
        let mut config = match &self.config {
            Some(path) => ArgoConfig::from_toml_file(path)?,
            None => ArgoConfig::default(),
        };

        let roots: Vec<DataRoot> = self
            .core_roots
            .iter()
            .map(|path| DataRoot::new(path.clone(), SourceKind::Core))
            .chain(
                self.bgc_roots
                    .iter()
                    .map(|path| DataRoot::new(path.clone(), SourceKind::Bgc)),
            )
            .collect();

        if !roots.is_empty() {
            config = config.with_roots(roots);
        }
        if let Some(limit) = self.history_limit {
            config.view.history_limit = limit;
        }
        if let Some(limit) = self.cycle_limit {
            config.view.cycle_limit = limit;
        }
        if self.progress {
            config = config.with_progress(true);
        }

        config.validate()?;
        debug!("Effective configuration: {:?}", config);
        Ok(config)
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("argo_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Print a human-readable overview of the aggregate
pub fn print_aggregate(aggregate: &Aggregate) {
    let stats = aggregate.stats();

    println!("{}", "Argo Aggregate".bright_green().bold());
    println!(
        "  {} {}",
        "Floats:".bright_cyan(),
        aggregate.len().to_string().bright_white().bold()
    );
    println!(
        "  {} {} of {}",
        "Files ingested:".bright_cyan(),
        stats.files_processed.to_string().bright_white(),
        stats.files_discovered
    );
    if stats.files_failed > 0 || stats.paths_unreadable > 0 || stats.roots_missing > 0 {
        println!(
            "  {} {} files, {} paths, {} roots",
            "Unreadable:".bright_red(),
            stats.files_failed.to_string().bright_red().bold(),
            stats.paths_unreadable.to_string().bright_red().bold(),
            stats.roots_missing.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {} accepted, {} without platform, {} without position",
        "Rows:".bright_cyan(),
        stats.rows_accepted.to_string().bright_white(),
        stats.rows_missing_platform,
        stats.rows_invalid_position
    );
    println!();

    for record in aggregate.records() {
        print_record_line(record);
    }
}

/// Print one float in detail, cycle by cycle
pub fn print_record(record: &FloatRecord) {
    print_record_line(record);

    for (number, cycle) in record.cycles.iter().enumerate() {
        let points = cycle.points();
        let max_pressure = points
            .iter()
            .filter_map(|p| p.pressure)
            .fold(None, |deepest: Option<f64>, p| {
                Some(deepest.map_or(p, |d| d.max(p)))
            });

        println!(
            "    {} {:>4}  {:>5} points  max pressure {}",
            "cycle".bright_black(),
            number + 1,
            points.len(),
            max_pressure.map_or_else(|| "-".to_string(), |p| format!("{:.1}", p))
        );
    }
}

fn print_record_line(record: &FloatRecord) {
    let kind = match record.kind {
        SourceKind::Core => record.kind.as_str().bright_blue(),
        SourceKind::Bgc => record.kind.as_str().bright_magenta(),
    };

    println!(
        "  {} [{}] {} entries, {} cycles, last seen {} at {:.3}, {:.3}",
        record.id.bright_yellow().bold(),
        kind,
        record.history.len(),
        record.cycles.len(),
        record.latest.date_iso.as_deref().unwrap_or("unknown"),
        record.latest.latitude,
        record.latest.longitude
    );
}
