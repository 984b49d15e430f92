//! brdwiz - view, edit and export Business Requirements Documents.
//!
//! # Usage
//!
//! ```bash
//! brdwiz open brd.md
//! brdwiz open --edit --theme light brd.md
//! brdwiz render --json brd.md
//! brdwiz export --export-dir out brd.md
//! brdwiz preview --limit 80 brd.md
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use brdwiz::app::App;
use brdwiz::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use brdwiz::export::{ExportArtifact, default_export_dir};
use brdwiz::format::{self, DEFAULT_PREVIEW_CHARS};
use brdwiz::ui::style::{Background, set_background};

/// View, edit and export Business Requirements Documents
#[derive(Parser, Debug)]
#[command(name = "brdwiz", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Save current command-line flags as defaults
    #[arg(long, global = true)]
    save: bool,

    /// Clear saved defaults
    #[arg(long, global = true)]
    clear: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open a BRD in the terminal viewer and editor
    Open {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Start in edit mode
        #[arg(long)]
        edit: bool,

        /// Directory exports are written to
        #[arg(long, value_name = "DIR")]
        export_dir: Option<PathBuf>,

        /// Force the color theme (light or dark)
        #[arg(long, value_enum)]
        theme: Option<ThemeMode>,
    },
    /// Print the formatted HTML fragment of every line
    Render {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print a JSON array of {line, html} objects
        #[arg(long)]
        json: bool,
    },
    /// Write BRD_Document.html
    Export {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory the document is written to
        #[arg(long, value_name = "DIR")]
        export_dir: Option<PathBuf>,
    },
    /// Print the short listing preview
    Preview {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Characters of source text to keep
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn read_brd(path: &Path) -> Result<String> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn apply_theme(theme: Option<ThemeMode>) {
    match theme.unwrap_or(ThemeMode::Auto) {
        ThemeMode::Auto => set_background(None),
        ThemeMode::Light => set_background(Some(Background::Light)),
        ThemeMode::Dark => set_background(Some(Background::Dark)),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    tracing::debug!(?effective, "effective flags");

    match cli.command {
        Command::Open {
            file,
            edit,
            export_dir,
            theme,
        } => {
            apply_theme(theme.or(effective.theme));
            if !file.exists() {
                anyhow::bail!("File not found: {}", file.display());
            }
            let mut app = App::new(file)
                .with_edit_mode(edit || effective.edit)
                .with_export_dir(export_dir.or(effective.export_dir))
                .with_config_paths(
                    Some(global_path),
                    local_path.exists().then_some(local_path),
                );
            app.run().context("Application error")
        }
        Command::Render { file, json } => {
            let content = read_brd(&file)?;
            if json {
                let lines = format::render_lines(&content);
                let out = serde_json::to_string_pretty(&lines)
                    .context("Failed to serialize rendered lines")?;
                println!("{out}");
            } else {
                for fragment in format::format_document(&content) {
                    println!("{fragment}");
                }
            }
            Ok(())
        }
        Command::Export { file, export_dir } => {
            let content = read_brd(&file)?;
            let dir = export_dir
                .or(effective.export_dir)
                .unwrap_or_else(|| default_export_dir(&file));
            let path = ExportArtifact::from_content(&content)
                .write_to(&dir)
                .context("Export failed")?;
            println!("Exported to {}", path.display());
            Ok(())
        }
        Command::Preview { file, limit } => {
            let content = read_brd(&file)?;
            let limit = limit
                .or(effective.preview_limit)
                .unwrap_or(DEFAULT_PREVIEW_CHARS);
            println!("{}", format::preview_snippet(&content, limit));
            Ok(())
        }
    }
}
