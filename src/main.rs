//! filedeck - A file manager with a terminal UI and a web interface.
//!
//! Usage:
//!   filedeck [PATH]            Launch interactive TUI
//!   filedeck serve             Run the web interface
//!   filedeck ls [PATH]         List a directory
//!   filedeck search QUERY      Find entries by name
//!   filedeck props PATH        Show item properties
//!   filedeck size PATH...      Compute total size
//!   filedeck roots             List drives and mount points
//!   filedeck --help            Show help

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use filedeck_core::{
    Config, SortColumn, SortOrder, SortState, format_datetime, format_optional_size, format_size,
};
use filedeck_ops::FileService;
use filedeck_web::AppState;

#[derive(Parser)]
#[command(
    name = "filedeck",
    version,
    about = "A file manager with a terminal UI and a web interface",
    long_about = "filedeck browses and manages files.\n\n\
                  Launch the interactive TUI by running `filedeck [PATH]`, serve the \
                  same operations over HTTP with `filedeck serve`, or use the other \
                  subcommands for one-shot queries."
)]
struct Cli {
    /// Directory to open (defaults to the configured start directory)
    path: Option<PathBuf>,

    /// Show hidden files
    #[arg(short = 'a', long, global = true)]
    all: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web interface
    Serve {
        /// Address to bind
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Directory new browser sessions start in
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// List a directory
    Ls {
        /// Directory to list
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Column to sort by (name, size, type, modified)
        #[arg(short, long, default_value = "name")]
        sort: SortColumn,

        /// Sort in descending order
        #[arg(short, long)]
        reverse: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Search entry names recursively (case-insensitive)
    Search {
        /// Text to look for
        query: String,

        /// Directory to search
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show properties of a file or folder
    Props {
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Compute the total size of files or folders
    Size {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List drives and mount points
    Roots {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let mut config = Config::load().context("Failed to load configuration")?;
    if cli.all {
        config.show_hidden = true;
    }

    match cli.command {
        None => {
            // The TUI owns the terminal, so no log subscriber here
            let path = cli.path.unwrap_or_else(|| config.start_directory());
            let path = path.canonicalize().context("Invalid path")?;
            filedeck_tui::run(path, &config)?;
        }
        Some(command) => {
            init_tracing();
            let service = FileService::new(&config);
            match command {
                Command::Serve { bind, port, root } => {
                    if let Some(bind) = bind {
                        config.bind = bind;
                    }
                    if let Some(port) = port {
                        config.port = port;
                    }
                    let root = root.unwrap_or_else(|| config.start_directory());
                    run_serve(service, &root, &config.listen_addr())?;
                }
                Command::Ls {
                    path,
                    sort,
                    reverse,
                    format,
                } => run_ls(&service, &path, sort, reverse, format)?,
                Command::Search {
                    query,
                    path,
                    format,
                } => run_search(&service, &path, &query, format)?,
                Command::Props { path, format } => run_props(&service, &path, format)?,
                Command::Size { paths } => run_size(&service, &paths)?,
                Command::Roots { format } => run_roots(&service, format)?,
            }
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the web server until Ctrl-C.
fn run_serve(service: FileService, root: &Path, addr: &str) -> Result<()> {
    let root = root.canonicalize().context("Invalid root directory")?;
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(filedeck_web::serve(AppState::new(service, root), addr))
        .with_context(|| format!("Web server failed on {addr}"))?;
    Ok(())
}

/// List a directory.
fn run_ls(
    service: &FileService,
    path: &Path,
    column: SortColumn,
    reverse: bool,
    format: OutputFormat,
) -> Result<()> {
    let path = path.canonicalize().context("Invalid path")?;
    let mut listing = service.list(&path)?;
    let order = if reverse {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };
    SortState::new(column, order).apply(&mut listing.entries);

    match format {
        OutputFormat::Text => {
            println!("{}", path.display());
            println!("{}", "─".repeat(70));
            for entry in &listing.entries {
                let name = if entry.is_folder() {
                    format!("{}/", entry.name)
                } else {
                    entry.name.to_string()
                };
                println!(
                    " {:<36} {:>10}  {:<16} {}",
                    name,
                    format_optional_size(entry.size),
                    entry.type_label(),
                    format_datetime(entry.modified.as_ref())
                );
            }
            println!("{}", "─".repeat(70));
            println!(" {}", listing.summary());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
    }

    Ok(())
}

/// Search entry names under a directory.
fn run_search(service: &FileService, path: &Path, query: &str, format: OutputFormat) -> Result<()> {
    let path = path.canonicalize().context("Invalid path")?;
    eprintln!("Searching {} for \"{query}\"...", path.display());
    let hits = service.search(&path, query);

    match format {
        OutputFormat::Text => {
            for hit in &hits {
                let suffix = if hit.entry.is_folder() { "/" } else { "" };
                println!(
                    " {:>10}  {}{suffix}",
                    format_optional_size(hit.entry.size),
                    hit.relative.display()
                );
            }
            println!();
            println!(" {} result(s)", hits.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
    }

    Ok(())
}

/// Show properties of one item.
fn run_props(service: &FileService, path: &Path, format: OutputFormat) -> Result<()> {
    let properties = service.properties(path)?;

    match format {
        OutputFormat::Text => {
            for (label, value) in properties.rows() {
                println!(" {label:>10}  {value}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&properties)?);
        }
    }

    Ok(())
}

/// Print the total size of one item, or totals for several.
fn run_size(service: &FileService, paths: &[PathBuf]) -> Result<()> {
    if let Some(missing) = paths.iter().find(|p| !p.exists()) {
        bail!("{} does not exist", missing.display());
    }

    if let [path] = paths {
        let bytes = if path.is_dir() {
            service.directory_size(path)
        } else {
            path.metadata()
                .with_context(|| format!("Cannot read {}", path.display()))?
                .len()
        };
        println!("{}  ({bytes} bytes)  {}", format_size(bytes), path.display());
        return Ok(());
    }

    let stats = service.selection_stats(paths);
    println!(
        "{}  ({} bytes)  {}",
        format_size(stats.bytes),
        stats.bytes,
        stats.describe(None)
    );
    Ok(())
}

/// Print the roots offered for navigation.
fn run_roots(service: &FileService, format: OutputFormat) -> Result<()> {
    let roots = service.roots();
    match format {
        OutputFormat::Text => roots.iter().for_each(|root| println!("{}", root.display())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&roots)?),
    }
    Ok(())
}
