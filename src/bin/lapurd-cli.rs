use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use lapurd::lifecycle::startup;

#[derive(Parser)]
#[command(name = "lapurd-cli")]
#[command(about = "Inspect a Lapurd site without serving it", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "lapurd.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump the path registry
    Routes,
    /// Show the entry a path resolves to
    Resolve { path: String },
    /// List the implementers of a hook in dispatch order
    Hooks { name: String },
    /// Render the page for a path
    Render { path: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = startup::load(&cli.config)?;
    lapurd::observability::logging::init(&config.observability.log_level);
    let site = startup::build_site(&config)?;

    match cli.command {
        Commands::Routes => {
            let routes = site
                .paths()
                .patterns()
                .into_iter()
                .map(|pattern| {
                    let winner = site.paths().winner(pattern)?;
                    let entries: Vec<_> = site.paths().entries(pattern).collect();
                    Ok(json!({
                        "pattern": pattern,
                        "winner": winner.map(|e| e.provider.namespace.as_str()),
                        "entries": entries,
                    }))
                })
                .collect::<lapurd::Result<Vec<_>>>()?;
            println!("{}", serde_json::to_string_pretty(&routes)?);
        }
        Commands::Resolve { path } => {
            let path = site.request_path(Some(&path));
            let route = site.paths().resolve(&path)?;
            let arguments = route.arguments();
            let output = json!({
                "route": route,
                "arguments": arguments,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Hooks { name } => {
            let mut cycle = site.cycle();
            for hooker in cycle.dispatcher().hookers(&name, false) {
                println!("{}\t{}", hooker.provider.kind, hooker.provider.namespace);
            }
        }
        Commands::Render { path } => {
            let page = site.handle(Some(&path))?;
            eprintln!("status: {}", page.status);
            println!("{}", page.body);
        }
    }

    Ok(())
}
