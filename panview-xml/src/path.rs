//! Borrowed cursors that remember how they reached a node.
//!
//! [`XmlNode`] trees own their children and carry no parent links. A
//! [`NodePath`] records the chain of elements from the document root down to
//! the current node, which gives ancestor traversal and xpath rendering
//! without any interior mutability in the tree itself.

use crate::tree::XmlNode;

/// A node plus every ancestor from the document root down to it.
#[derive(Debug, Clone)]
pub struct NodePath<'a> {
    chain: Vec<&'a XmlNode>,
}

impl<'a> NodePath<'a> {
    /// Start a path at the document root.
    pub fn root(node: &'a XmlNode) -> Self {
        Self { chain: vec![node] }
    }

    /// The node this path points at.
    pub fn node(&self) -> &'a XmlNode {
        self.chain[self.chain.len() - 1]
    }

    /// Number of elements between the root and this node (root is 0).
    pub fn depth(&self) -> usize {
        self.chain.len() - 1
    }

    fn extend(&self, child: &'a XmlNode) -> Self {
        let mut chain = Vec::with_capacity(self.chain.len() + 1);
        chain.extend_from_slice(&self.chain);
        chain.push(child);
        Self { chain }
    }

    /// Step into the first child with `tag`.
    pub fn child(&self, tag: &str) -> Option<NodePath<'a>> {
        self.node().get_child(tag).map(|child| self.extend(child))
    }

    /// Step into every child with `tag`.
    pub fn children(&self, tag: &str) -> Vec<NodePath<'a>> {
        self.node()
            .children
            .iter()
            .filter(|child| child.tag == tag)
            .map(|child| self.extend(child))
            .collect()
    }

    /// Step through a nested child path.
    pub fn descend(&self, path: &[&str]) -> Option<NodePath<'a>> {
        let mut current = self.clone();
        for segment in path {
            current = current.child(segment)?;
        }
        Some(current)
    }

    /// Every immediate `entry` child.
    pub fn entries(&self) -> Vec<NodePath<'a>> {
        self.children("entry")
    }

    /// The immediate `entry` child carrying `name`.
    pub fn entry_named(&self, name: &str) -> Option<NodePath<'a>> {
        self.node()
            .entries()
            .find(|entry| entry.name() == Some(name))
            .map(|entry| self.extend(entry))
    }

    /// The path to this node's parent, or `None` at the root.
    pub fn parent(&self) -> Option<NodePath<'a>> {
        if self.chain.len() < 2 {
            return None;
        }
        Some(Self {
            chain: self.chain[..self.chain.len() - 1].to_vec(),
        })
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = &'a XmlNode> + '_ {
        self.chain[..self.chain.len() - 1].iter().rev().copied()
    }

    /// `(ancestor, child_on_path)` pairs walking upward from this node.
    ///
    /// The first pair is `(parent, self)`, the last is `(root, child_of_root)`.
    pub fn links_upward(&self) -> impl Iterator<Item = (&'a XmlNode, &'a XmlNode)> + '_ {
        self.chain.windows(2).rev().map(|pair| (pair[0], pair[1]))
    }

    /// Render an absolute xpath, qualifying every named element by its `name` attribute.
    pub fn xpath(&self) -> String {
        let mut out = String::new();
        for node in &self.chain {
            out.push('/');
            out.push_str(&node.tag);
            if let Some(name) = node.name() {
                out.push_str("[@name=");
                push_literal(&mut out, name);
                out.push(']');
            }
        }
        out
    }
}

/// Quote `value` as an xpath string literal.
///
/// Single quotes are preferred. A value holding only `'` switches to double
/// quotes; a value holding both doubles each embedded `'`.
fn push_literal(out: &mut String, value: &str) {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };
    out.push(quote);
    for c in value.chars() {
        if c == quote {
            out.push(c);
        }
        out.push(c);
    }
    out.push(quote);
}

/// Read a quoted literal from the start of `input`, returning it and the rest.
fn take_literal(input: &str) -> Option<(String, &str)> {
    let quote = input.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let mut value = String::new();
    let mut chars = input.char_indices().skip(1);
    while let Some((idx, c)) = chars.next() {
        if c != quote {
            value.push(c);
            continue;
        }
        let after = &input[idx + c.len_utf8()..];
        if after.starts_with(quote) {
            value.push(quote);
            chars.next();
            continue;
        }
        return Some((value, after));
    }
    None
}

/// One parsed xpath step: a tag plus an optional `@name` predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    tag: String,
    name: Option<String>,
}

/// Resolve an xpath produced by [`NodePath::xpath`] against `root`.
///
/// Only the `/tag[@name='value']` subset is understood; anything else
/// resolves to `None`. Name values may contain `/`.
pub fn find_xpath<'a>(root: &'a XmlNode, xpath: &str) -> Option<NodePath<'a>> {
    let steps = parse_steps(xpath)?;
    let (first, rest) = steps.split_first()?;
    if !step_matches(first, root) {
        return None;
    }

    let mut current = NodePath::root(root);
    for step in rest {
        let next = current
            .node()
            .children
            .iter()
            .find(|child| step_matches(step, child))?;
        current = current.extend(next);
    }
    Some(current)
}

fn step_matches(step: &Step, node: &XmlNode) -> bool {
    node.tag == step.tag
        && match &step.name {
            Some(name) => node.name() == Some(name.as_str()),
            None => true,
        }
}

fn parse_steps(xpath: &str) -> Option<Vec<Step>> {
    let mut steps = Vec::new();
    let mut rest = xpath.trim();

    while !rest.is_empty() {
        rest = rest.strip_prefix('/')?;
        let tag_end = rest.find(['/', '[']).unwrap_or(rest.len());
        let tag = &rest[..tag_end];
        if tag.is_empty() {
            return None;
        }
        rest = &rest[tag_end..];

        let mut name = None;
        if let Some(predicate) = rest.strip_prefix("[@name=") {
            let (literal, after) = take_literal(predicate)?;
            name = Some(literal);
            rest = after.strip_prefix(']')?;
        }

        steps.push(Step {
            tag: tag.to_string(),
            name,
        });
    }

    if steps.is_empty() {
        None
    } else {
        Some(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::{find_xpath, NodePath};
    use crate::parse;

    const DOC: &[u8] = br#"<config>
        <shared>
          <address>
            <entry name="10.0.0.0/8"><ip-netmask>10.0.0.0/8</ip-netmask></entry>
            <entry name="srv1"><fqdn>srv1.example.com</fqdn></entry>
          </address>
        </shared>
      </config>"#;

    #[test]
    fn xpath_qualifies_named_entries() {
        let root = parse(DOC).expect("parse");
        let entry = NodePath::root(&root)
            .descend(&["shared", "address"])
            .and_then(|address| address.entry_named("srv1"))
            .expect("entry");

        assert_eq!(
            entry.xpath(),
            "/config/shared/address/entry[@name='srv1']"
        );
        assert_eq!(entry.depth(), 3);
    }

    #[test]
    fn ancestors_walk_upward_to_root() {
        let root = parse(DOC).expect("parse");
        let entry = NodePath::root(&root)
            .descend(&["shared", "address", "entry"])
            .expect("entry");
        let tags: Vec<&str> = entry.ancestors().map(|node| node.tag.as_str()).collect();

        assert_eq!(tags, vec!["address", "shared", "config"]);
        let (parent, child) = entry.links_upward().next().expect("first link");
        assert_eq!(parent.tag, "address");
        assert_eq!(child.name(), Some("10.0.0.0/8"));
    }

    #[test]
    fn find_xpath_round_trips_names_with_slashes() {
        let root = parse(DOC).expect("parse");
        let found = find_xpath(&root, "/config/shared/address/entry[@name='10.0.0.0/8']")
            .expect("resolved");

        assert_eq!(found.node().get_text(&["ip-netmask"]), Some("10.0.0.0/8"));
        assert!(find_xpath(&root, "/config/shared/address/entry[@name='nope']").is_none());
        assert!(find_xpath(&root, "/other/shared").is_none());
        assert!(find_xpath(&root, "config/shared").is_none());
    }

    #[test]
    fn names_with_quotes_round_trip() {
        let root = parse(
            br#"<config><shared><address>
              <entry name="o'brien"/>
              <entry name="it's &quot;quoted&quot;"/>
            </address></shared></config>"#,
        )
        .expect("parse");
        let address = NodePath::root(&root)
            .descend(&["shared", "address"])
            .expect("address");

        let single = address.entry_named("o'brien").expect("single");
        assert_eq!(
            single.xpath(),
            r#"/config/shared/address/entry[@name="o'brien"]"#
        );

        let both = address.entry_named(r#"it's "quoted""#).expect("both");
        let xpath = both.xpath();
        assert_eq!(
            xpath,
            r#"/config/shared/address/entry[@name='it''s "quoted"']"#
        );
        let found = find_xpath(&root, &xpath).expect("resolved");
        assert_eq!(found.node(), both.node());
        assert_eq!(
            find_xpath(&root, &single.xpath()).map(|p| p.node()),
            Some(single.node())
        );
    }
}
