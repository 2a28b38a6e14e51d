use serde::Serialize;

use crate::category::ObjectCategory;
use crate::detect::{detect_version, ConfigFlavor, VersionDetection};
use crate::document::ConfigDocument;
use crate::snapshot::Snapshot;

/// Object count for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: ObjectCategory,
    pub count: usize,
}

/// Overview of one configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inventory {
    pub flavor: ConfigFlavor,
    pub version: Option<VersionDetection>,
    pub device_groups: Vec<String>,
    pub templates: Vec<String>,
    pub vsys: Vec<String>,
    pub counts: Vec<CategoryCount>,
}

/// Collect scope names and per-category counts.
pub fn build_inventory(doc: &ConfigDocument, snapshot: &Snapshot) -> Inventory {
    Inventory {
        flavor: doc.flavor(),
        version: detect_version(doc.root()),
        device_groups: doc.device_group_names(),
        templates: doc.template_names(),
        vsys: doc.vsys_names(),
        counts: ObjectCategory::ALL
            .into_iter()
            .map(|category| CategoryCount {
                category,
                count: snapshot.count(category),
            })
            .collect(),
    }
}
