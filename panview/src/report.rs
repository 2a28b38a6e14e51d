use colored::Colorize;
use serde_json::Value;

use crate::category::ObjectCategory;
use crate::filter::FieldInfo;
use crate::inspect::Inventory;
use crate::paginate::Page;

/// Render the inventory of one document.
pub fn render_inventory(inv: &Inventory) -> String {
    let mut out = Vec::new();
    let version = inv
        .version
        .as_ref()
        .map(|v| format!(" version={} source={}", v.value, v.source))
        .unwrap_or_default();
    out.push(format!("type={}{version}", inv.flavor).cyan().to_string());
    out.push(String::new());
    out.push("device_groups".to_string());
    append_list(&mut out, &inv.device_groups);
    out.push("templates".to_string());
    append_list(&mut out, &inv.templates);
    out.push("vsys".to_string());
    append_list(&mut out, &inv.vsys);
    out.push(String::new());
    out.push("objects".to_string());
    for row in &inv.counts {
        out.push(format!("- {}: {}", row.category, row.count));
    }
    out.join("\n")
}

/// Render one page of listed objects.
pub fn render_page(category: ObjectCategory, page: &Page<Value>) -> String {
    let mut out = Vec::new();
    out.push(
        format!(
            "{category} page {}/{} ({} matching, page_size={})",
            page.page,
            page.total_pages.max(1),
            page.total_items,
            page.page_size
        )
        .cyan()
        .to_string(),
    );
    if page.items.is_empty() {
        out.push("- none".to_string());
    }
    for item in &page.items {
        let name = item.get("name").and_then(Value::as_str).unwrap_or("?");
        out.push(format!("- {}", name.green().bold()));
        let Some(fields) = item.as_object() else {
            continue;
        };
        for (key, value) in fields {
            if key == "name" {
                continue;
            }
            if let Some(text) = render_value(value) {
                out.push(format!("  {key}: {text}"));
            }
        }
    }
    if page.has_next {
        out.push(format!("next: --page {}", page.page + 1).dimmed().to_string());
    }
    out.join("\n")
}

/// Render the filterable fields of one category.
pub fn render_fields(category: ObjectCategory, fields: &[FieldInfo]) -> String {
    let mut out = vec![format!("{category} fields").cyan().to_string()];
    for field in fields {
        let mut flags = Vec::new();
        if field.computed {
            flags.push("computed".to_string());
        } else if let Some(path) = field.path.filter(|path| *path != field.name) {
            flags.push(format!("path={path}"));
        }
        if field.case_sensitive {
            flags.push("case-sensitive".to_string());
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        let field_type = serde_json::to_value(field.field_type)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        out.push(format!(
            "- {} ({field_type}){flags}: {}",
            field.name.bold(),
            field.operators.join(" ")
        ));
    }
    out.join("\n")
}

/// Text form of a JSON value; `None` for nulls and empty containers.
fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Array(items) if items.is_empty() => None,
        Value::Array(items) if items.iter().all(Value::is_string) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}

fn append_list(out: &mut Vec<String>, items: &[String]) {
    if items.is_empty() {
        out.push("- none".to_string());
        return;
    }
    for item in items {
        out.push(format!("- {item}"));
    }
}
