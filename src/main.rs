use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use lcdblocks::board::{BoardCatalog, BoardRegistry};
use lcdblocks::generator::toolbox_xml::generate_toolbox_xml;
use lcdblocks::locale::{Localizer, MessageCatalog, keys};
use lcdblocks::model::FieldItem;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect and export the Arduino LCD block schemas", long_about = None)]
struct Cli {
    /// Board whose digital pins fill the pin dropdowns
    #[arg(short, long, default_value = BoardCatalog::DEFAULT_BOARD)]
    board: String,

    /// Extra board profile (JSON file, or directory scanned for *.json)
    #[arg(long, value_name = "PATH")]
    boards: Option<Utf8PathBuf>,

    /// JSON object of message overrides ({"KEY": "text"})
    #[arg(long, value_name = "FILE")]
    messages: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the block types and their fields
    List,
    /// Print all schemas as JSON
    Export,
    /// Print the toolbox category XML
    Toolbox,
    /// List the known boards
    Boards,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut catalog = BoardCatalog::new();
    if let Some(path) = &cli.boards {
        if path.is_dir() {
            catalog
                .load_dir(path)
                .with_context(|| format!("Failed to load boards from {}", path))?;
        } else {
            catalog
                .load_file(path)
                .with_context(|| format!("Failed to load board {}", path))?;
        }
    }
    catalog.select(&cli.board)?;

    let messages = match &cli.messages {
        Some(path) => MessageCatalog::english().load_json_file(path)?,
        None => MessageCatalog::english(),
    };

    let registry = lcdblocks::lcd_registry(&catalog, &messages)?;

    match cli.command {
        Command::List => {
            for schema in registry.schemas() {
                println!("{}", schema.block_type);
                for group in &schema.groups {
                    let row: Vec<String> = group
                        .items
                        .iter()
                        .map(|item| match item {
                            FieldItem::Label(text) => text.clone(),
                            FieldItem::Field(def) => format!("<{}>", def.key),
                        })
                        .collect();
                    match &group.name {
                        Some(name) => println!("  [{}] {}", name, row.join(" ")),
                        None => println!("  {}", row.join(" ")),
                    }
                }
            }
        }
        Command::Export => {
            let json = serde_json::to_string_pretty(&registry)?;
            println!("{}", json);
        }
        Command::Toolbox => {
            print!("{}", generate_toolbox_xml(&registry, &messages.message(keys::LCD_CATEGORY)));
        }
        Command::Boards => {
            let selected = catalog.selected().name.clone();
            for name in catalog.names() {
                let marker = if name == selected { "*" } else { " " };
                let pins = catalog.get(name).map(|b| b.digital_pins.len()).unwrap_or(0);
                println!("{} {} ({} digital pins)", marker, name, pins);
            }
        }
    }
    Ok(())
}
