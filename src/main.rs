//! lntree - link-aware directory tree inspector.
//!
//! Usage:
//!   lnt [PATH]            Print the walked tree as markdown
//!   lnt export [PATH]     Export the walked tree as JSON
//!   lnt inspect PATH      Classify a single path
//!   lnt links PATH        Resolve and print a link chain
//!   lnt --help            Show help

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};

use lntree_walk::{
    AttrSelection, FollowLinks, LinkStatus, SortOrder, WalkConfig, Walker, get_file,
    track_link,
};

#[derive(Parser)]
#[command(
    name = "lntree",
    version,
    about = "Link-aware directory tree inspector",
    long_about = "lntree builds a classified tree of a directory, resolving symbolic \
                  link chains to spot broken links and reference loops.\n\n\
                  Run `lnt [PATH]` for a markdown listing, or use subcommands for \
                  JSON export and single-path diagnostics."
)]
struct Cli {
    /// Directory to walk (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Skip entries whose full path matches this regular expression
    #[arg(long)]
    ignore: Option<String>,

    /// Listing order
    #[arg(long, value_enum, default_value = "a-z")]
    sort: SortMode,

    /// Follow links of this kind into directories (repeatable)
    #[arg(short, long, value_enum)]
    follow: Vec<FollowKind>,

    /// Show file sizes
    #[arg(short, long)]
    size: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Walk a directory and export the tree as JSON
    Export {
        /// Directory to walk
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Skip entries whose full path matches this regular expression
        #[arg(long)]
        ignore: Option<String>,

        /// Follow links of this kind into directories (repeatable)
        #[arg(short, long, value_enum)]
        follow: Vec<FollowKind>,

        /// Attach every attribute to each record
        #[arg(long)]
        full: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Classify a single path and print its record
    Inspect {
        /// Path to inspect
        path: PathBuf,
    },

    /// Resolve a link chain and print every hop
    Links {
        /// Path to resolve
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum SortMode {
    /// Ascending by name
    #[default]
    #[value(name = "a-z")]
    Az,
    /// Descending by name
    #[value(name = "z-a")]
    Za,
    /// Listing order
    None,
}

impl From<SortMode> for SortOrder {
    fn from(mode: SortMode) -> Self {
        match mode {
            SortMode::Az => SortOrder::Ascending,
            SortMode::Za => SortOrder::Descending,
            SortMode::None => SortOrder::Unsorted,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FollowKind {
    /// Symbolic links
    Sym,
    /// Hard-link-like entries (platform-dependent)
    Hard,
}

fn follow_set(kinds: &[FollowKind]) -> FollowLinks {
    let mut follow = FollowLinks::none();
    for kind in kinds {
        match kind {
            FollowKind::Sym => follow.symbolic = true,
            FollowKind::Hard => follow.hard = true,
        }
    }
    follow
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Export {
            path,
            ignore,
            follow,
            full,
            output,
        }) => {
            run_export(&path, ignore, &follow, full, output)?;
        }
        Some(Command::Inspect { path }) => run_inspect(&path)?,
        Some(Command::Links { path }) => run_links(&path)?,
        None => run_tree(&cli.path, cli.ignore, &cli.follow, cli.sort, cli.size)?,
    }

    Ok(())
}

/// Walk and print a markdown tree.
fn run_tree(
    path: &PathBuf,
    ignore: Option<String>,
    follow: &[FollowKind],
    sort: SortMode,
    show_size: bool,
) -> Result<()> {
    let attrs = AttrSelection {
        size: show_size,
        link: true,
        ..AttrSelection::none()
    };
    let config = WalkConfig::builder()
        .root(path)
        .ignore(ignore)
        .follow(follow_set(follow))
        .sort(SortOrder::from(sort))
        .attrs(attrs)
        .build()
        .context("Invalid configuration")?;

    let tree = Walker::new().walk(&config).context("Walk failed")?;

    println!("*{}*", tree.root_path.display());
    println!();
    print_records(&tree.children, 0, show_size);

    if tree.has_warnings() {
        println!();
        println!("{} warning(s) during walk", tree.warnings.len());
    }

    Ok(())
}

/// Walk and export the tree as JSON.
fn run_export(
    path: &PathBuf,
    ignore: Option<String>,
    follow: &[FollowKind],
    full: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let attrs = if full {
        AttrSelection::all()
    } else {
        AttrSelection::none()
    };
    let config = WalkConfig::builder()
        .root(path)
        .ignore(ignore)
        .follow(follow_set(follow))
        .sort(SortOrder::Ascending)
        .attrs(attrs)
        .build()
        .context("Invalid configuration")?;

    let tree = Walker::new().walk(&config).context("Walk failed")?;
    let json = serde_json::to_string_pretty(&tree)?;

    match output {
        Some(output_path) => {
            std::fs::write(&output_path, json)?;
            eprintln!("Exported to {}", output_path.display());
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}

/// Classify a single path and print its record as JSON.
fn run_inspect(path: &PathBuf) -> Result<()> {
    let record = get_file(path, &AttrSelection::all()).context("Inspection failed")?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Resolve a link chain and print every hop.
fn run_links(path: &PathBuf) -> Result<()> {
    let chain = track_link(path).context("Resolution failed")?;

    if !chain.is_link() {
        println!("{} is not a link", path.display());
        return Ok(());
    }

    for (hop, rel) in chain.rel_paths.iter().enumerate() {
        if hop == 0 {
            println!("{}", rel.display());
        } else {
            println!("  -> {}", rel.display());
        }
    }

    let status = match chain.status {
        LinkStatus::Success => "resolved",
        LinkStatus::Broken => "broken: the final target does not exist",
        LinkStatus::Loop => "loop: the final target repeats an earlier hop",
    };
    println!("{} hop(s), {}", chain.hops(), status);

    Ok(())
}

/// Print records as markdown bullets.
fn print_records(records: &[lntree_core::FileRecord], depth: usize, show_size: bool) {
    let indent = "  ".repeat(depth);
    for record in records {
        let icon = if record.is_dir() || record.children.is_some() {
            "📁"
        } else {
            "📄"
        };
        let mut line = format!("{indent}- {icon} {}", record.name);

        if let Some(chain) = &record.link {
            line.push_str(&format!(" -> {}", chain.final_rel().display()));
            match chain.status {
                LinkStatus::Broken => line.push_str(" (broken)"),
                LinkStatus::Loop => line.push_str(" (loop)"),
                LinkStatus::Success => {}
            }
        }
        if record.is_recur() {
            line.push_str(" (recursive)");
        }
        if show_size {
            if let Some(size) = record.size {
                line.push_str(&format!(" [{}]", format_size(size)));
            }
        }
        println!("{line}");

        if let Some(children) = &record.children {
            print_records(children, depth + 1, show_size);
        }
    }
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
