//! `showroom` binary: inspect the component catalog from the shell or
//! launch the interactive playground.

pub mod demo;
pub mod tracing_setup;

use anyhow::Context;
use anyhow::bail;
use clap::Parser;
use clap::Subcommand;
use showroom_catalog::ComponentKey;
use showroom_catalog::Loader;
use showroom_memory::FileKvStore;
use showroom_memory::MemoryStore;
use showroom_memory::session;
use showroom_perf::OptimizedLoader;
use showroom_search::SearchConfig;
use showroom_search::SearchIndex;
use showroom_tui::App;
use showroom_tui::PlaygroundController;
use showroom_tui::RecordingSurface;
use showroom_tui::SystemClipboard;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

#[derive(Debug, Parser)]
#[command(name = "showroom", about = "Component playground", version)]
pub struct Cli {
    /// Verbose logging to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Where session memory is stored.
    #[arg(long, global = true, value_name = "DIR", default_value = ".showroom")]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every registered component.
    List,
    /// Fuzzy-search the catalog.
    Search { query: String },
    /// Print a component's property schema.
    Describe {
        /// `category/name` key, e.g. `atoms/button`.
        key: String,
    },
    /// Usage and cache statistics.
    Stats,
    /// Write the last session as a transferable file.
    Export {
        #[arg(long, default_value = "showroom-session.json")]
        out: PathBuf,
    },
    /// Import a previously exported session file.
    Import { path: PathBuf },
    /// Forget all usage history, remembered props and panel prefs.
    Clear,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let resolver = demo::resolver();
    let keys = resolver.keys();
    let index = SearchIndex::build(&keys, &SearchConfig::default());
    let loader = Arc::new(Loader::new(Arc::new(resolver)));
    let memory = MemoryStore::open(Box::new(FileKvStore::new(&cli.data_dir)));
    tracing::debug!(
        components = keys.len(),
        data_dir = %cli.data_dir.display(),
        "catalog indexed"
    );

    match cli.cmd {
        None => {
            let controller = PlaygroundController::new(
                index,
                OptimizedLoader::new(loader),
                memory,
                Box::new(Arc::new(Mutex::new(RecordingSurface::new()))),
                Box::new(SystemClipboard::default()),
            );
            App::new(controller).run()
        }
        Some(Command::List) => {
            for entry in index.entries() {
                println!("{}/{}", entry.category, entry.name);
            }
            Ok(())
        }
        Some(Command::Search { query }) => {
            let results = index.query_scored(&query);
            if results.is_empty() {
                println!("no results");
                return Ok(());
            }
            for (score, entry) in results {
                println!("{score:>5}  {}/{}", entry.category, entry.name);
            }
            Ok(())
        }
        Some(Command::Describe { key }) => {
            let key = ComponentKey::parse(&key)
                .with_context(|| format!("not a category/name key: {key}"))?;
            let descriptor = loader.load(&key)?;
            println!("{}", descriptor.title);
            println!("{}", descriptor.description);
            for (name, spec) in &descriptor.property_schema {
                let options = if spec.options.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", spec.options.join("|"))
                };
                println!("  {name}: {:?}{options} = {}", spec.control, spec.default);
            }
            Ok(())
        }
        Some(Command::Stats) => {
            println!("{}", serde_json::to_string_pretty(&memory.stats())?);
            Ok(())
        }
        Some(Command::Export { out }) => {
            let Some(key) = memory.last_used() else {
                bail!("no session recorded yet");
            };
            let config =
                session::export_config(&key, &memory.get_remembered(&key), &memory.panel_states());
            std::fs::write(&out, session::to_json(&config)?)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("exported {key} to {}", out.display());
            Ok(())
        }
        Some(Command::Import { path }) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config = session::from_json(&text)?;
            match memory.apply_imported(&config) {
                Some(key) => {
                    memory.save_all()?;
                    println!("imported session for {key}");
                    Ok(())
                }
                None => bail!("import references an unknown component"),
            }
        }
        Some(Command::Clear) => {
            memory.clear_all()?;
            println!("memory cleared");
            Ok(())
        }
    }
}
