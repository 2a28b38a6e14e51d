use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use panview::category::ObjectCategory;

#[derive(Parser, Debug)]
#[command(name = "panview")]
#[command(about = "Browse PAN-OS and Panorama XML configuration backups")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Summarize one config: flavor, scopes and object counts.
    Inspect(InspectArgs),
    /// List objects of one category with filters and pagination.
    List(ListArgs),
    /// Show the filterable fields of one category.
    Fields(FieldsArgs),
    /// Print the raw XML of one object by xpath.
    Show(ShowArgs),
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    pub file: PathBuf,
    /// Print detected flavor and version only.
    #[arg(long)]
    pub detect: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Where the config document comes from.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Config file to read.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Name of a config registered in the settings file.
    #[arg(long)]
    pub config: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Object category, for example `addresses` or `security-rules`.
    pub category: ObjectCategory,
    #[command(flatten)]
    pub source: SourceArgs,
    /// Filter as `field_operator=value`; a bare key filters on null.
    #[arg(long = "filter", short = 'f')]
    pub filters: Vec<String>,
    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    /// Items per page. Defaults to the settings value.
    #[arg(long)]
    pub page_size: Option<usize>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Settings TOML file. Defaults to ./panview.toml if present.
    #[arg(long)]
    pub settings: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct FieldsArgs {
    pub category: ObjectCategory,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    pub file: PathBuf,
    /// Absolute xpath as printed by `list`.
    #[arg(long)]
    pub xpath: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
