use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use persistent_highlights_config::{Config, validate_color};
use persistent_highlights_engine::{
    HighlightStore, StaticSelection, UuidGenerator, apply_stored_highlights,
    create_highlight_from_selection, load_markdown, to_html,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "persistent-highlights", about = "Persistent highlights over markdown content")]
struct Cli {
    /// Config file to use instead of ~/.config/persistent-highlights/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Highlight store to use instead of the configured one
    #[arg(long, global = true, env = "PERSISTENT_HIGHLIGHTS_STORE")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a markdown file as HTML with the stored highlights marked
    Render { file: PathBuf },
    /// Highlight the text between two char offsets of a markdown file
    Add {
        file: PathBuf,
        #[arg(short, long)]
        start: usize,
        #[arg(short, long)]
        end: usize,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// List stored highlights in creation order
    List,
    /// Delete the highlight at a list index
    Delete { index: usize },
    /// Delete all highlights
    Clear,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let store_path = cli.store.unwrap_or_else(|| config.store_path.clone());
    let mut store = HighlightStore::open(&store_path)
        .with_context(|| format!("Failed to open highlight store {}", store_path.display()))?;

    match cli.command {
        Command::Render { file } => {
            let mut tree = load_markdown(&file, &config.container_id)?;
            if let Some(summary) =
                apply_stored_highlights(&mut tree, store.highlights(), &config.container_id)
            {
                log::info!(
                    "Marked {} highlights, skipped {}",
                    summary.applied,
                    summary.skipped
                );
            }
            println!("{}", to_html(&tree, tree.root()));
        }
        Command::Add {
            file,
            start,
            end,
            color,
        } => {
            let color = color.unwrap_or_else(|| config.default_color.clone());
            validate_color(&color)?;

            let mut tree = load_markdown(&file, &config.container_id)?;
            let Some(container) = tree.find_by_id(&config.container_id) else {
                bail!("No element with id {:?} in {}", config.container_id, file.display());
            };
            apply_stored_highlights(&mut tree, store.highlights(), &config.container_id);

            let mut selection = StaticSelection::from_offsets(&tree, container, start, end);
            let Some(highlight) = create_highlight_from_selection(
                &mut tree,
                &mut selection,
                &config.container_id,
                &color,
                &mut UuidGenerator,
            ) else {
                bail!("Nothing to highlight between offsets {start} and {end}");
            };

            println!("{}", highlight.id);
            store.on_highlight(highlight)?;
        }
        Command::List => {
            for (index, highlight) in store.highlights().iter().enumerate() {
                println!(
                    "{index}\t{}\t{}..{}\t{}",
                    highlight.id, highlight.start, highlight.end, highlight.color
                );
            }
        }
        Command::Delete { index } => match store.on_delete(index)? {
            Some(removed) => println!("Deleted {}", removed.id),
            None => log::warn!(
                "No highlight at index {index} ({} stored)",
                store.highlights().len()
            ),
        },
        Command::Clear => {
            let count = store.highlights().len();
            store.on_delete_all()?;
            println!("Deleted {count} highlights");
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    match loaded {
        Some(config) => Ok(config),
        None => {
            if let Some(path) = path {
                log::warn!("Config file {} not found, using defaults", path.display());
            }
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_arguments() {
        let cli = Cli::try_parse_from([
            "persistent-highlights",
            "add",
            "notes.md",
            "--start",
            "0",
            "--end",
            "14",
            "--store",
            "/tmp/h.json",
        ])
        .unwrap();

        assert_eq!(cli.store, Some(PathBuf::from("/tmp/h.json")));
        match cli.command {
            Command::Add {
                start, end, color, ..
            } => assert_eq!((start, end, color), (0, 14, None)),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
