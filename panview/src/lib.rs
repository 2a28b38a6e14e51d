//! Filterable, paginated views over PAN-OS and Panorama configuration backups.
//!
//! A configuration backup nests the same object types (addresses, services,
//! rules, profiles) at several depths: the shared section, each device group,
//! each template and template vsys, and each firewall vsys. This library
//! flattens those scopes into typed records that remember where they were
//! defined, and filters them through one declarative, per-field engine.
//!
//! # Architecture
//!
//! ## Document model
//!
//! - [`document`] — Load one XML document and read typed objects per scope
//! - [`extract`] — Build domain records from `entry` elements
//! - [`location`] — Resolve the scope of an element by walking its ancestors
//! - [`detect`] — Tell Panorama and firewall configs apart
//! - [`model`] — Typed records for every object category
//!
//! ## Filtering
//!
//! - [`filter`] — Field schemas, operators and predicate evaluation
//! - [`category`] — The category registry used by the CLI
//!
//! ## Serving
//!
//! - [`snapshot`] — Parse once, query many times
//! - [`paginate`] — 1-based page slicing
//! - [`settings`] — `panview.toml` loading
//! - [`inspect`] — Per-document inventory
//! - [`report`] — Terminal-friendly colored output
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//!
//! use panview::category::ObjectCategory;
//! use panview::document::ConfigDocument;
//! use panview::filter::parse_filter_args;
//! use panview::snapshot::Snapshot;
//!
//! # fn main() -> anyhow::Result<()> {
//! let doc = ConfigDocument::load(Path::new("panorama.xml"))?;
//! let snapshot = Snapshot::build(&doc);
//! let filters = parse_filter_args(&["name_contains=srv", "tag_in=prod"]);
//! let page = snapshot.query(ObjectCategory::Addresses, &filters, 1, 50)?;
//! println!("{} of {} addresses", page.items.len(), page.total_items);
//! # Ok(())
//! # }
//! ```
//!
//! # Built on panview-xml
//!
//! Generic XML parsing, writing and path tracking live in `panview-xml`.
//! Everything PAN-OS specific is contained in this crate.

pub mod category;
pub mod detect;
pub mod document;
pub mod extract;
pub mod filter;
pub mod inspect;
pub mod location;
pub mod model;
pub mod paginate;
pub mod report;
pub mod settings;
pub mod snapshot;
