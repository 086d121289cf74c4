//! Scaffold a sokol project: pick a backend, write the templates, fetch headers.
//!
//! The three phases run strictly in order. A failure while writing the
//! templates stops the run before any download; a failed header is reported
//! and the remaining headers are still fetched.

use anyhow::{Context, Result};
use colored::*;
use log::info;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sokolgen::writer::write_scaffold;
use sokolgen::{prompt, templates, Backend, Config, LocalFs};

use super::fetch;

#[derive(Debug, Default)]
pub struct NewOptions {
    pub backend: Option<Backend>,
    pub dir: Option<PathBuf>,
    pub base_url: Option<String>,
    pub no_fetch: bool,
    pub dry_run: bool,
    pub json: bool,
}

/// Execute the new command. Returns the process exit status.
pub fn execute(options: NewOptions) -> Result<i32> {
    let root = match &options.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let mut config = Config::load(&root)?;
    if let Some(url) = &options.base_url {
        config.set_base_url(url.clone());
    }

    let backend = match options.backend {
        Some(backend) => backend,
        None => {
            // Keep stdout clean for the JSON document
            let mut menu: Box<dyn Write> = if options.json {
                Box::new(io::stderr())
            } else {
                Box::new(io::stdout())
            };
            let stdin = io::stdin();
            prompt::read_backend(&mut stdin.lock(), &mut menu).context("Error reading input")?
        }
    };
    info!("backend {} ({})", backend, backend.identifier());

    if options.dry_run {
        display_plan(&root, backend, &config, options.no_fetch);
        return Ok(0);
    }

    let sink = LocalFs::new(&root);
    let written = write_scaffold(&sink, backend).context("Failed to write project files")?;

    if !options.json {
        println!("\n🎨 Scaffolding sokol project ({})", backend.label());
        for path in &written {
            println!("   {} Created {}", "✓".green().bold(), relative(&root, path));
        }
    }

    if options.no_fetch {
        if options.json {
            output_json(backend, &written, None)?;
        }
        return Ok(0);
    }

    let report = fetch::run_fetch(&config, &sink, options.json)?;

    if options.json {
        output_json(backend, &written, Some(&report))?;
    } else {
        fetch::print_summary(&report);
        display_next_steps();
    }

    Ok(fetch::exit_code(&report))
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn display_plan(root: &Path, backend: Backend, config: &Config, no_fetch: bool) {
    println!("Dry run: nothing will be written\n");
    println!("Backend: {} ({})", backend.label(), backend.identifier());
    for file in templates::render_all(backend) {
        println!("  would write {}", root.join(file.path).display());
    }
    if no_fetch {
        return;
    }
    for (file, url) in config.remote.entries() {
        println!(
            "  would fetch {} -> {}",
            url,
            root.join(&config.remote.dir).join(file).display()
        );
    }
}

fn output_json(
    backend: Backend,
    written: &[PathBuf],
    report: Option<&sokolgen::FetchReport>,
) -> Result<()> {
    let result = serde_json::json!({
        "backend": backend,
        "define": backend.identifier(),
        "written": written,
        "headers": report.map(|r| r.summary()),
        "complete": report.map_or(true, |r| r.is_complete()),
    });
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn display_next_steps() {
    println!("\n{}", "🎯 Next Steps".bold().green());
    println!("   make wasm        # build sokol.js with emscripten");
    println!("   emrun sokol.html # serve and open in a browser");
}
