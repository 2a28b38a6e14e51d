use anyhow::{Context, Result};
use clap::Parser;
use panview::detect::{detect_version, ConfigFlavor};
use panview::document::ConfigDocument;
use panview::inspect::build_inventory;
use panview::report::{render_fields, render_inventory};
use panview::snapshot::Snapshot;
use panview_xml::to_xml_string;
use serde_json::json;
use tracing_subscriber::EnvFilter;

mod cli;
mod list_cmd;

use cli::{Cli, Command, FieldsArgs, InspectArgs, OutputFormat, ShowArgs};

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Inspect(args) => run_inspect(args),
        Command::List(args) => list_cmd::run_list(args),
        Command::Fields(args) => run_fields(args),
        Command::Show(args) => run_show(args),
    }
}

/// Logs go to stderr so JSON on stdout stays parseable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("panview=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let doc = ConfigDocument::load(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    if args.detect {
        let version = detect_version(doc.root());
        match args.format {
            OutputFormat::Text => {
                let (value, source) = version
                    .map(|v| (v.value, v.source))
                    .unwrap_or_else(|| ("unknown".to_string(), "not found".to_string()));
                println!("type={} version={value} version_source={source}", doc.flavor());
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({ "type": doc.flavor(), "version": version }))?
                );
            }
        }
        if doc.flavor() == ConfigFlavor::Unknown {
            eprintln!("warning: no device groups, templates or vsys found; only shared objects will be listed");
        }
        return Ok(());
    }

    let snapshot = Snapshot::build(&doc);
    let inventory = build_inventory(&doc, &snapshot);
    match args.format {
        OutputFormat::Text => println!("{}", render_inventory(&inventory)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&inventory)?),
    }
    Ok(())
}

fn run_fields(args: FieldsArgs) -> Result<()> {
    let fields = args.category.describe();
    match args.format {
        OutputFormat::Text => println!("{}", render_fields(args.category, &fields)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&fields)?),
    }
    Ok(())
}

fn run_show(args: ShowArgs) -> Result<()> {
    let doc = ConfigDocument::load(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let node = doc
        .lookup_xpath(&args.xpath)
        .with_context(|| format!("no element at xpath {}", args.xpath))?;

    match args.format {
        OutputFormat::Text => println!("{}", to_xml_string(node).context("failed to render XML")?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(node)?),
    }
    Ok(())
}
