//! Download the sokol headers into the target directory.

use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;

use sokolgen::fetch::{FetchOutcome, FetchReport, Fetcher, ReqwestClient};
use sokolgen::{Config, FileSink};

/// Fetch phase shared with `new`. Prints one line per header unless `quiet`.
pub(crate) fn run_fetch(config: &Config, sink: &dyn FileSink, quiet: bool) -> Result<FetchReport> {
    let client = ReqwestClient::new(config.timeout).context("Failed to build HTTP client")?;
    let fetcher = Fetcher::new(&client, &config.remote);

    if !quiet {
        println!(
            "\n📥 Downloading {} headers into {}/",
            config.remote.files.len(),
            config.remote.dir.display()
        );
    }

    let report = fetcher
        .fetch_all_with(sink, |outcome| {
            if !quiet {
                print_outcome(outcome);
            }
        })
        .context("Header download abandoned")?;

    Ok(report)
}

fn print_outcome(outcome: &FetchOutcome) {
    match &outcome.result {
        Ok(_) => println!("   {} Successfully downloaded {}", "✓".green().bold(), outcome.file),
        Err(e) => println!(
            "   {} Error downloading {}: {}",
            "✗".red().bold(),
            outcome.file,
            e
        ),
    }
}

/// Exit status for a finished fetch: 0 when every header arrived.
pub(crate) fn exit_code(report: &FetchReport) -> i32 {
    report.first_error().map_or(0, |e| e.exit_code())
}

pub(crate) fn print_summary(report: &FetchReport) {
    let failed = report.failed().count();
    if failed == 0 {
        println!("\n{}", "✅ All headers downloaded".green().bold());
    } else {
        println!(
            "\n{} {} of {} headers failed",
            "⚠️".yellow(),
            failed,
            report.outcomes.len()
        );
    }
}

/// Execute the fetch command
pub fn execute(dir: Option<PathBuf>, base_url: Option<String>, json: bool) -> Result<i32> {
    let root = match dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let mut config = Config::load(&root)?;
    if let Some(url) = base_url {
        config.set_base_url(url);
    }

    let sink = sokolgen::LocalFs::new(&root);
    let report = run_fetch(&config, &sink, json)?;

    if json {
        let result = serde_json::json!({
            "base_url": config.remote.base_url,
            "dir": sink.display_path(&config.remote.dir),
            "headers": report.summary(),
            "complete": report.is_complete(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&report);
    }

    Ok(exit_code(&report))
}
