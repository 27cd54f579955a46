//! Immutable, forkable HandBrakeCLI argument lists.
//!
//! A [`CommandBuilder`] never changes once built. [`CommandBuilder::with`]
//! returns a new builder that shares the receiver's arguments and adds one
//! more, so a single base configuration can be reused for many commands, from
//! many threads, without any of them seeing each other's additions.

use std::fmt;
use std::sync::Arc;

/// Turn an identifier such as `native_language` into `--native-language`.
///
/// No validation happens; HandBrakeCLI rejects unknown switches itself.
pub fn render_switch(identifier: &str) -> String {
    format!("--{}", identifier.replace('_', "-"))
}

/// One switch and the values that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArgument {
    /// Rendered switch, including the leading `--`.
    pub switch: String,
    pub values: Vec<String>,
}

impl CommandArgument {
    pub fn new<I, V>(identifier: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        Self {
            switch: render_switch(identifier),
            values: values.into_iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// A link in the shared argument list; each points at the arguments before it.
#[derive(Debug)]
struct Link {
    argument: CommandArgument,
    previous: Option<Arc<Link>>,
    len: usize,
}

/// An immutable HandBrakeCLI argument list.
///
/// # Example
///
/// ```
/// use discforge_av::CommandBuilder;
///
/// let base = CommandBuilder::new().with("input", ["/dev/sr0"]);
/// let movie = base.with("title", [1]).flag("markers");
/// let extras = base.with("title", [6]);
///
/// assert_eq!(
///     movie.to_argument_vector(),
///     ["--input", "/dev/sr0", "--title", "1", "--markers"]
/// );
/// assert_eq!(extras.to_argument_vector(), ["--input", "/dev/sr0", "--title", "6"]);
/// assert_eq!(base.to_argument_vector(), ["--input", "/dev/sr0"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandBuilder {
    head: Option<Arc<Link>>,
}

impl CommandBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new builder with `--<identifier> values...` appended.
    ///
    /// Values are stringified, so numbers can be passed directly.
    pub fn with<I, V>(&self, identifier: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        self.push(CommandArgument::new(identifier, values))
    }

    /// Return a new builder with a value-less `--<identifier>` appended.
    pub fn flag(&self, identifier: &str) -> Self {
        self.with(identifier, std::iter::empty::<String>())
    }

    /// Return a new builder with an already-built argument appended.
    pub fn push(&self, argument: CommandArgument) -> Self {
        Self {
            head: Some(Arc::new(Link {
                argument,
                previous: self.head.clone(),
                len: self.len() + 1,
            })),
        }
    }

    /// Number of switches in the list.
    pub fn len(&self) -> usize {
        self.head.as_ref().map_or(0, |link| link.len)
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Arguments in the order they were added.
    pub fn arguments(&self) -> Vec<CommandArgument> {
        let mut arguments: Vec<CommandArgument> = self.iter_rev().cloned().collect();
        arguments.reverse();
        arguments
    }

    /// The flat argument vector to hand to HandBrakeCLI.
    pub fn to_argument_vector(&self) -> Vec<String> {
        self.arguments()
            .into_iter()
            .flat_map(|arg| std::iter::once(arg.switch).chain(arg.values))
            .collect()
    }

    /// Whether `--<identifier>` has been added.
    ///
    /// Only switch names are compared, never values.
    pub fn contains_switch(&self, identifier: &str) -> bool {
        let switch = render_switch(identifier);
        self.iter_rev().any(|arg| arg.switch == switch)
    }

    /// Walk the arguments from the most recent back to the first.
    fn iter_rev(&self) -> impl Iterator<Item = &CommandArgument> {
        std::iter::successors(self.head.as_deref(), |link| link.previous.as_deref())
            .map(|link| &link.argument)
    }
}

impl fmt::Display for CommandBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_argument_vector().join(" "))
    }
}

impl PartialEq for CommandBuilder {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter_rev().eq(other.iter_rev())
    }
}

impl Eq for CommandBuilder {}
