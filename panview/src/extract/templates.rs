use panview_xml::{NodePath, XmlNode};

use crate::extract::{entry_names, members, text, FromEntry, MalformedEntry};
use crate::model::{Template, TemplateStack};

/// Names of the vsys configured in a template's `config/devices/entry/vsys`.
fn template_vsys(template: &XmlNode) -> Vec<String> {
    template
        .descend(&["config", "devices"])
        .map(|devices| {
            devices
                .entries()
                .flat_map(|device| entry_names(device, &["vsys"]))
                .collect()
        })
        .unwrap_or_default()
}

impl FromEntry for Template {
    const KIND: &'static str = "template";
    const CONTAINER: &'static [&'static str] = &["template"];

    fn from_entry(entry: &NodePath<'_>, name: &str) -> Result<Self, MalformedEntry> {
        let node = entry.node();
        Ok(Template {
            name: name.to_string(),
            description: text(node, &["description"]),
            vsys: template_vsys(node),
            xpath: entry.xpath(),
        })
    }
}

impl FromEntry for TemplateStack {
    const KIND: &'static str = "template-stack";
    const CONTAINER: &'static [&'static str] = &["template-stack"];

    fn from_entry(entry: &NodePath<'_>, name: &str) -> Result<Self, MalformedEntry> {
        let node = entry.node();
        let templates = members(node, &["templates"]);
        if templates.is_empty() {
            return Err(MalformedEntry::new(Self::KIND, name, "no templates"));
        }
        Ok(TemplateStack {
            name: name.to_string(),
            description: text(node, &["description"]),
            templates,
            devices: entry_names(node, &["devices"]),
            xpath: entry.xpath(),
        })
    }
}

#[cfg(test)]
mod tests {
    use panview_xml::{parse, NodePath};

    use crate::extract::extract_from;
    use crate::model::{Template, TemplateStack};

    const DEVICES: &[u8] = br#"<devices>
      <template>
        <entry name="t1"><config><devices><entry name="localhost.localdomain"><vsys>
          <entry name="vsys1"/><entry name="vsys2"/>
        </vsys></entry></devices></config></entry>
      </template>
      <template-stack>
        <entry name="stack">
          <templates><member>t1</member><member>t2</member></templates>
          <devices><entry name="0001"/></devices>
        </entry>
        <entry name="hollow"><templates/></entry>
      </template-stack>
    </devices>"#;

    #[test]
    fn template_lists_its_vsys() {
        let root = parse(DEVICES).expect("parse");
        let templates: Vec<Template> = extract_from(&NodePath::root(&root));
        assert_eq!(templates[0].vsys, vec!["vsys1", "vsys2"]);
        assert_eq!(templates[0].xpath, "/devices/template/entry[@name='t1']");
    }

    #[test]
    fn stacks_need_templates() {
        let root = parse(DEVICES).expect("parse");
        let stacks: Vec<TemplateStack> = extract_from(&NodePath::root(&root));
        assert_eq!(stacks.len(), 1);
        assert_eq!(stacks[0].templates, vec!["t1", "t2"]);
        assert_eq!(stacks[0].devices, vec!["0001"]);
    }
}
