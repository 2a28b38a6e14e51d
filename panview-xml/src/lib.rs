//! XML primitives for reading PAN-OS and Panorama configuration backups.
//!
//! The tree is fully owned ([`XmlNode`]); positional context such as
//! ancestors and xpaths comes from borrowed [`NodePath`] cursors.

pub mod parser;
pub mod path;
pub mod tree;
pub mod writer;

pub use parser::{parse, parse_file, ParseError};
pub use path::{find_xpath, NodePath};
pub use tree::XmlNode;
pub use writer::{to_xml_string, WriteError};
