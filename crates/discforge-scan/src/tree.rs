//! Indentation-coded tree parsing.
//!
//! HandBrakeCLI prints the interesting part of a scan as a tree of lines
//! marked with `+`, two spaces of indentation per level:
//!
//! ```text
//! + title 1:
//!   + duration: 01:43:54
//!   + chapters:
//!     + 1: cells 0->0, 19588 blocks, duration 00:03:30
//! ```
//!
//! [`parse`] recovers that structure without knowing anything about what the
//! lines mean. Interpreting the nodes is left to [`crate::extract`].

/// Line marker that introduces a node.
pub const MARKER: char = '+';

/// Name given to the synthetic root returned by [`parse`].
pub const ROOT_NAME: &str = "__root__";

/// Spaces of indentation per tree level.
const INDENT_WIDTH: usize = 2;

/// One line of the tree and everything nested beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    children: Vec<Node>,
}

impl Node {
    /// Create a node with no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Append a child, keeping encounter order.
    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// The raw line text with its marker stripped.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Children in source order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Whether this is the synthetic root produced by [`parse`].
    pub fn is_root(&self) -> bool {
        self.name == ROOT_NAME
    }

    /// Child at the given position.
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    /// First child whose name is exactly `name`.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// First child whose name satisfies the predicate.
    pub fn find_child<F>(&self, mut predicate: F) -> Option<&Node>
    where
        F: FnMut(&str) -> bool,
    {
        self.children.iter().find(|c| predicate(&c.name))
    }

    /// Number of levels below this node (0 for a leaf).
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Parse indentation-coded text into a tree rooted at a synthetic node.
///
/// Only lines whose first non-blank character is [`MARKER`] take part.
/// Text without any marker lines yields a root with no children.
///
/// # Example
///
/// ```
/// use discforge_scan::tree::parse;
///
/// let root = parse("noise\n+ a:\n  + b\n+ c\n");
/// assert_eq!(root.children().len(), 2);
/// assert_eq!(root.children()[0].children()[0].name(), "b");
/// ```
pub fn parse(text: &str) -> Node {
    let lines: Vec<&str> = text
        .lines()
        .filter(|line| line.trim_start().starts_with(MARKER))
        .collect();

    let mut root = Node::new(ROOT_NAME);
    root.children = read_children(&lines, 0);
    root
}

fn read_children(lines: &[&str], depth: usize) -> Vec<Node> {
    split_blocks(lines, depth)
        .into_iter()
        .map(|block| read_node(block, depth))
        .collect()
}

/// Split `lines` into blocks that each start with a marker at `depth`.
fn split_blocks<'a, 'b>(lines: &'a [&'b str], depth: usize) -> Vec<&'a [&'b str]> {
    let starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| marker_at(line, depth))
        .map(|(i, _)| i)
        .collect();

    let Some(&first) = starts.first() else {
        if !lines.is_empty() {
            tracing::trace!("Dropping {} orphan line(s) at depth {}", lines.len(), depth);
        }
        return Vec::new();
    };
    if first > 0 {
        tracing::trace!("Dropping {} orphan line(s) at depth {}", first, depth);
    }

    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(lines.len());
            &lines[start..end]
        })
        .collect()
}

fn read_node(block: &[&str], depth: usize) -> Node {
    let mut node = Node::new(node_name(block[0], depth));
    node.children = read_children(&block[1..], depth + 1);
    node
}

/// Whether the marker sits exactly at the indentation for `depth`.
fn marker_at(line: &str, depth: usize) -> bool {
    let indent = depth * INDENT_WIDTH;
    let bytes = line.as_bytes();
    bytes.len() > indent
        && bytes[..indent].iter().all(|&b| b == b' ')
        && bytes[indent] == MARKER as u8
}

fn node_name(line: &str, depth: usize) -> String {
    let rest = &line[depth * INDENT_WIDTH + MARKER.len_utf8()..];
    rest.strip_prefix(' ').unwrap_or(rest).to_string()
}
