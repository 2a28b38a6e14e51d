use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use panview::document::ConfigDocument;
use panview::filter::parse_filter_args;
use panview::report::render_page;
use panview::settings::{load_or_default, Settings};
use panview::snapshot::Snapshot;

use crate::cli::{ListArgs, OutputFormat, SourceArgs};

pub fn run_list(args: ListArgs) -> Result<()> {
    let settings = load_or_default(args.settings.as_deref()).context("failed to load settings")?;
    let path = resolve_source(&args.source, &settings)?;

    let doc = ConfigDocument::load(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let snapshot = Snapshot::build(&doc).with_max_page_size(settings.max_page_size);

    let filters = parse_filter_args(&args.filters);
    let page = snapshot
        .query(
            args.category,
            &filters,
            args.page,
            settings.page_size(args.page_size),
        )
        .context("failed to serialize results")?;

    match args.format {
        OutputFormat::Text => println!("{}", render_page(args.category, &page)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&page)?),
    }
    Ok(())
}

fn resolve_source(source: &SourceArgs, settings: &Settings) -> Result<PathBuf> {
    if let Some(file) = &source.file {
        return Ok(file.clone());
    }
    let Some(name) = &source.config else {
        bail!("either --file or --config is required");
    };
    match settings.config_path(name) {
        Some(path) => Ok(path.to_path_buf()),
        None => {
            let known = settings.config_names();
            if known.is_empty() {
                bail!("unknown config '{name}': no configs are registered in the settings file");
            }
            bail!("unknown config '{name}' (known: {})", known.join(", "))
        }
    }
}
