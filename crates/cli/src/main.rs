//! `bizbot-workflow` CLI entry-point.
//!
//! Available sub-commands:
//! - `templates`: list the node palette and starter workflows.
//! - `validate` : decode a snapshot file and report on it.
//! - `render`   : print SVG path data for every edge of a graph.
//! - `replay`   : run a recorded command script against a session.
//! - `list` / `show` / `delete`: manage saved workflows.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use catalog::Catalog;
use clap::{Parser, Subcommand};
use editor::{
    open_session, replay, EditorCommand, EditorConfig, EditorSession, GraphSnapshot, SessionMode,
    TemplateSource,
};
use store::{JsonDirStore, WorkflowStore};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "bizbot-workflow",
    about = "Build, inspect and store BizBot workflow graphs",
    version
)]
struct Cli {
    /// Directory holding saved workflows.
    #[arg(long, global = true, env = "BIZBOT_STORE_DIR", default_value = "workflows")]
    store_dir: PathBuf,

    /// Optional editor configuration (JSON).
    #[arg(long, global = true, env = "BIZBOT_EDITOR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the node palette and starter workflows.
    Templates,
    /// Validate a workflow snapshot JSON file.
    Validate {
        /// Path to the snapshot file.
        path: PathBuf,
    },
    /// Print SVG path data for every renderable edge.
    Render {
        /// Snapshot file to render.
        #[arg(conflicts_with = "template")]
        path: Option<PathBuf>,
        /// Render a starter workflow instead of a file.
        #[arg(long)]
        template: Option<String>,
    },
    /// Replay a JSON command script and print the resulting graph.
    Replay {
        /// Path to the script (a JSON array of commands).
        script: PathBuf,
        #[arg(long, env = "BIZBOT_MODE", default_value = "editable")]
        mode: SessionMode,
        /// Start from a starter workflow instead of the default graph.
        #[arg(long)]
        template: Option<String>,
        /// Save the result under this name.
        #[arg(long)]
        save: Option<String>,
    },
    /// List saved workflows, newest first.
    List,
    /// Print a saved workflow.
    Show { id: Uuid },
    /// Delete a saved workflow.
    Delete { id: Uuid },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let catalog = Catalog::builtin();

    match cli.command {
        Command::Templates => {
            println!("Node palette:");
            for t in catalog.nodes() {
                println!("  {:<18} {:<12} {}", t.label, t.category.as_str(), t.description);
            }
            println!("\nStarter workflows:");
            for t in catalog.workflows() {
                println!(
                    "  {:<18} {} nodes, {} connections: {}",
                    t.name,
                    t.graph.nodes.len(),
                    t.graph.connections.len(),
                    t.description
                );
            }
        }
        Command::Validate { path } => {
            let snapshot = read_snapshot(&path)?;
            println!(
                "✅ {} nodes, {} connections, {} trigger(s)",
                snapshot.nodes.len(),
                snapshot.connections.len(),
                snapshot.trigger_count()
            );
            for orphan in snapshot.orphaned_connections() {
                println!("⚠️  orphaned connection {} → {}", orphan.from, orphan.to);
            }
        }
        Command::Render { path, template } => {
            let snapshot = match (path, template) {
                (Some(path), _) => read_snapshot(&path)?,
                (None, Some(name)) => starter(&catalog, &name)?.clone(),
                (None, None) => return Err(anyhow!("give a snapshot path or --template")),
            };
            let session = open_session(SessionMode::ReadOnly, Some(snapshot), config);
            for edge in session.edge_paths() {
                println!("{} -> {}: {}", edge.from, edge.to, edge.path.to_svg());
            }
        }
        Command::Replay {
            script,
            mode,
            template,
            save,
        } => {
            let text = std::fs::read_to_string(&script)
                .with_context(|| format!("cannot read script {}", script.display()))?;
            let commands: Vec<EditorCommand> =
                serde_json::from_str(&text).context("invalid command script")?;

            let initial = template
                .map(|name| starter(&catalog, &name).cloned())
                .transpose()?;
            let mut session = open_session(mode, initial, config);
            replay(session.as_mut(), &commands, &catalog);
            info!(commands = commands.len(), mode = %mode, "script replayed");

            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);

            if let Some(name) = save {
                let snapshot = session
                    .save()
                    .ok_or_else(|| anyhow!("read-only sessions cannot be saved"))?;
                let store = JsonDirStore::open(&cli.store_dir).await?;
                let saved = store.save(&name, snapshot).await?;
                eprintln!("saved as {}", saved.id);
            }
        }
        Command::List => {
            let store = JsonDirStore::open(&cli.store_dir).await?;
            for w in store.list().await? {
                println!(
                    "{}  {}  {:<24} {} nodes",
                    w.id,
                    w.saved_at.format("%Y-%m-%d %H:%M"),
                    w.name,
                    w.snapshot.nodes.len()
                );
            }
        }
        Command::Show { id } => {
            let store = JsonDirStore::open(&cli.store_dir).await?;
            let saved = store.get(id).await?;
            println!("{}", serde_json::to_string_pretty(&saved)?);
        }
        Command::Delete { id } => {
            let store = JsonDirStore::open(&cli.store_dir).await?;
            store.delete(id).await?;
            info!(%id, "workflow deleted");
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EditorConfig> {
    let Some(path) = path else {
        return Ok(EditorConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    serde_json::from_str(&text).context("invalid editor config")
}

fn read_snapshot(path: &Path) -> Result<GraphSnapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read file {}", path.display()))?;
    Ok(GraphSnapshot::from_json(&text)?)
}

fn starter<'a>(catalog: &'a Catalog, name: &str) -> Result<&'a GraphSnapshot> {
    catalog
        .workflow_template(name)
        .map(|t| &t.graph)
        .ok_or_else(|| anyhow!("unknown starter workflow: {name}"))
}
