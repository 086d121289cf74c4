use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use sokolgen::{Backend, ScaffoldError};

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Scaffold a sokol C project for native and web builds", long_about = None)]
struct Cli {
    /// Enable debug logging (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write main.c, Makefile, sokol.html, style.css and fetch the headers
    New {
        #[command(flatten)]
        args: NewArgs,
    },

    /// Only download the sokol headers
    Fetch {
        #[command(flatten)]
        remote: RemoteArgs,

        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// List the selectable graphics backends
    Backends {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Options shared by every command that downloads headers
#[derive(Args, Default)]
struct RemoteArgs {
    /// Target directory (defaults to the current directory)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Override the header base URL
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Args, Default)]
struct NewArgs {
    /// Graphics backend (glcore, gles3, d3d11, metal, wgpu, noapi, SOKOL_* or 1-6); prompts when omitted
    #[arg(short, long, value_parser = Backend::from_str)]
    backend: Option<Backend>,

    #[command(flatten)]
    remote: RemoteArgs,

    /// Skip downloading the sokol headers
    #[arg(long)]
    no_fetch: bool,

    /// Show what would be written without touching disk or network
    #[arg(long)]
    dry_run: bool,

    /// Output results as JSON
    #[arg(short, long)]
    json: bool,
}

impl NewArgs {
    fn into_options(self) -> commands::new::NewOptions {
        commands::new::NewOptions {
            backend: self.backend,
            dir: self.remote.dir,
            base_url: self.remote.base_url,
            no_fetch: self.no_fetch,
            dry_run: self.dry_run,
            json: self.json,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    // No subcommand: the interactive flow
    let command = cli.command.unwrap_or(Commands::New {
        args: NewArgs::default(),
    });

    match command {
        Commands::New { args } => commands::new::execute(args.into_options()),
        Commands::Fetch { remote, json } => {
            commands::fetch::execute(remote.dir, remote.base_url, json)
        }
        Commands::Backends { json } => {
            commands::backends::execute(json)?;
            Ok(0)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            let code = e
                .chain()
                .find_map(|cause| cause.downcast_ref::<ScaffoldError>())
                .map_or(1, ScaffoldError::exit_code);
            std::process::exit(code);
        }
    }
}
