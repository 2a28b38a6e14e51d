use std::fmt;

use panview_xml::XmlNode;
use serde::Serialize;

/// Detected configuration family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFlavor {
    /// Panorama management config with device groups or templates.
    Panorama,
    /// Firewall config with vsys under `devices/entry`.
    Firewall,
    /// Neither shape found.
    Unknown,
}

impl ConfigFlavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigFlavor::Panorama => "panorama",
            ConfigFlavor::Firewall => "firewall",
            ConfigFlavor::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ConfigFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detected software version with provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionDetection {
    pub value: String,
    pub source: String,
}

/// Detect config family from the `devices/entry` children.
///
/// Best effort; extraction does not depend on the answer.
pub fn detect_flavor(root: &XmlNode) -> ConfigFlavor {
    let Some(devices) = root.get_child("devices") else {
        return ConfigFlavor::Unknown;
    };
    let has = |tag: &str| devices.entries().any(|entry| entry.get_child(tag).is_some());

    if has("device-group") || has("template") {
        ConfigFlavor::Panorama
    } else if has("vsys") {
        ConfigFlavor::Firewall
    } else {
        ConfigFlavor::Unknown
    }
}

/// Return the root `version` attribute if present.
pub fn detect_version(root: &XmlNode) -> Option<VersionDetection> {
    root.attr("version")
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| VersionDetection {
            value: v.to_string(),
            source: format!("{}@version", root.tag),
        })
}
