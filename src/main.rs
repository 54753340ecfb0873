use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

use content_overlay::{detect_source, load_schema, Config, Pipeline, Policy};

/// Merge localized content rows onto a schema tree
#[derive(Debug, Parser)]
#[command(name = "content-overlay", version)]
struct Cli {
    /// Schema JSON (nested tree or flat list of components)
    #[arg(long)]
    schema: PathBuf,

    /// Content: a directory of `<locale>/<slug>.csv` or a JSON bundle
    #[arg(long)]
    content: PathBuf,

    /// Locale to merge (repeatable); defaults to every locale in the content
    #[arg(long = "locale")]
    locales: Vec<String>,

    /// Write the merged tree as JSON here
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Config JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Record failed merges and continue instead of stopping the locale
    #[arg(long)]
    keep_going: bool,

    /// -v for debug, -vv for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    if cli.keep_going {
        config.on_error = Policy::Skip;
    }

    println!("📐 Loading schema...");
    let components = load_schema(&cli.schema)?;
    println!("✓ {} schema nodes", components.len());

    let source = detect_source(&cli.content)?;
    println!("📂 Content source: {} ({})", cli.content.display(), source.name());

    let mut pipeline = Pipeline::new(config, source, components);
    let locales = if cli.locales.is_empty() {
        pipeline.available_locales()?
    } else {
        cli.locales.clone()
    };

    let reports = pipeline.run_all(&locales)?;

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let mut clean = true;
    for report in &reports {
        let mark = if report.is_clean() { "✅" } else { "⚠️ " };
        println!(
            "{} {}: {} merged, {} skipped, {} failed{}",
            mark,
            report.locale,
            report.merged,
            report.skipped.len(),
            report.failures.len(),
            if report.aborted { " (aborted)" } else { "" }
        );
        for failure in &report.failures {
            println!("   ✗ {} {}: {}", failure.kind, failure.slug, failure.message);
        }
        clean &= report.failures.is_empty() && !report.aborted;
    }

    if let Some(path) = &cli.output {
        pipeline.write_output(path)?;
        println!("\n💾 Wrote {}", path.display());
    }

    if !clean {
        std::process::exit(1);
    }
    Ok(())
}
