//! Path types for addressing nested values.
//!
//! A [`Path`] is an ordered sequence of [`Segment`]s, each either a record key
//! or a sequence index. Paths can be built incrementally or parsed from the
//! familiar dotted notation:
//!
//! ```rust
//! use immutree::{Path, Segment};
//!
//! let parsed: Path = "users[0].profile.name".into();
//! let built = Path::new().key("users").index(0).key("profile").key("name");
//! assert_eq!(parsed, built);
//!
//! // Purely numeric components are indices whichever notation is used
//! let dotted: Path = "users.0.name".into();
//! assert_eq!(dotted.segments()[1], Segment::Index(0));
//! ```
//!
//! Parsing never fails: the input is normalized instead. Leading, trailing and
//! repeated dots are dropped, as are empty brackets.

use std::{borrow::Cow, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

/// A single step in a [`Path`].
///
/// Serializes untagged (`"name"` or `0`). Deserialized keys are normalized
/// the same way parsed components are, so `"0"` becomes `Index(0)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Segment {
    /// Record key access
    Key(String),
    /// Sequence index access
    Index(usize),
}

impl Segment {
    /// Returns true if this segment is an index.
    ///
    /// Index segments drive auto-vivification: a missing container that is
    /// about to be indexed by one is created as a sequence.
    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }

    /// Returns true if this segment is a key.
    pub fn is_key(&self) -> bool {
        matches!(self, Segment::Key(_))
    }

    /// Resolves the segment as a sequence index.
    ///
    /// Keys resolve when they are the canonical decimal form of an index.
    pub fn to_index(&self) -> Option<usize> {
        match self {
            Segment::Index(i) => Some(*i),
            Segment::Key(k) => parse_index(k),
        }
    }

    /// Resolves the segment as a record key. Indices are stringified.
    pub fn to_key(&self) -> Cow<'_, str> {
        match self {
            Segment::Key(k) => Cow::Borrowed(k),
            Segment::Index(i) => Cow::Owned(i.to_string()),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => write!(f, "{k}"),
            Segment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        Segment::Key(s.to_string())
    }
}

impl From<String> for Segment {
    fn from(s: String) -> Self {
        Segment::Key(s)
    }
}

impl From<usize> for Segment {
    fn from(i: usize) -> Self {
        Segment::Index(i)
    }
}

impl From<i32> for Segment {
    fn from(i: i32) -> Self {
        // Negative integers have no index meaning; keep them as keys.
        match usize::try_from(i) {
            Ok(i) => Segment::Index(i),
            Err(_) => Segment::Key(i.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Segment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Key(String),
            Index(usize),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Key(key) => component_to_segment(&key),
            Raw::Index(index) => Segment::Index(index),
        })
    }
}

/// Parses the canonical decimal form of an index ("0", "17", never "017").
fn parse_index(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if s.len() > 1 && s.starts_with('0') {
        return None;
    }
    s.parse().ok()
}

fn component_to_segment(component: &str) -> Segment {
    match parse_index(component) {
        Some(i) => Segment::Index(i),
        None => Segment::Key(component.to_string()),
    }
}

/// Splits a dotted/bracketed path string into normalized segments.
///
/// - `"a.b.c"` → `[a, b, c]`
/// - `"a[0].b"` and `"a.0.b"` → `[a, 0, b]`
/// - `"a['x.y']"` → `[a, "x.y"]`
/// - `".a..b."` → `[a, b]`
/// - an unclosed bracket is kept as literal key text
pub fn normalize_path(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        match c {
            '.' => {
                if !current.is_empty() {
                    segments.push(component_to_segment(&current));
                    current.clear();
                }
                rest = &rest[1..];
            }
            '[' => match rest.find(']') {
                Some(close) => {
                    if !current.is_empty() {
                        segments.push(component_to_segment(&current));
                        current.clear();
                    }
                    let inner = rest[1..close].trim();
                    let quoted = inner.len() >= 2
                        && ((inner.starts_with('\'') && inner.ends_with('\''))
                            || (inner.starts_with('"') && inner.ends_with('"')));
                    if quoted {
                        segments.push(Segment::Key(inner[1..inner.len() - 1].to_string()));
                    } else if !inner.is_empty() {
                        segments.push(component_to_segment(inner));
                    }
                    rest = &rest[close + 1..];
                }
                None => {
                    current.push_str(rest);
                    rest = "";
                }
            },
            _ => {
                current.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    if !current.is_empty() {
        segments.push(component_to_segment(&current));
    }
    segments
}

/// An owned path into a nested value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<Segment>);

impl Path {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates a path from already-split segments, without normalization.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    /// Parses a dotted path string. See [`normalize_path`].
    pub fn parse(input: &str) -> Self {
        Self(normalize_path(input))
    }

    /// Appends a key segment (builder style).
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.0.push(Segment::Key(key.into()));
        self
    }

    /// Appends an index segment (builder style).
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(Segment::Index(index));
        self
    }

    /// Appends a segment in place.
    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.0.push(segment.into());
    }

    /// Joins another path onto the end of this one.
    pub fn join(mut self, other: impl Into<Path>) -> Self {
        self.0.extend(other.into().0);
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn first(&self) -> Option<&Segment> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    /// Returns the number of segments in the path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the parent path, or `None` for an empty path.
    pub fn parent(&self) -> Option<Path> {
        let (_, init) = self.0.split_last()?;
        Some(Path(init.to_vec()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.0.iter()
    }
}

/// Renders a segment slice in dotted notation, used for error context.
pub(crate) fn display_segments(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Key(k) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(k);
            }
            Segment::Index(i) => {
                out.push_str(&format!("[{i}]"));
            }
        }
    }
    if out.is_empty() {
        out.push_str("(empty path)");
    }
    out
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", display_segments(&self.0))
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&String> for Path {
    fn from(s: &String) -> Self {
        Self::parse(s)
    }
}

impl From<usize> for Path {
    fn from(i: usize) -> Self {
        Self(vec![Segment::Index(i)])
    }
}

impl From<i32> for Path {
    fn from(i: i32) -> Self {
        Self(vec![Segment::from(i)])
    }
}

impl From<Segment> for Path {
    fn from(segment: Segment) -> Self {
        Self(vec![segment])
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl From<&[Segment]> for Path {
    fn from(segments: &[Segment]) -> Self {
        Self(segments.to_vec())
    }
}

impl<const N: usize> From<[Segment; N]> for Path {
    fn from(segments: [Segment; N]) -> Self {
        Self(segments.into())
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Constructs a [`Path`] from components.
///
/// String components are taken verbatim as keys (no dot splitting), integer
/// components become indices. This is the way to address a key that itself
/// contains a dot.
///
/// ```rust
/// use immutree::{path, Path};
///
/// let p = path!("users", 0, "first.last");
/// assert_eq!(p, Path::new().key("users").index(0).key("first.last"));
/// assert!(path!().is_empty());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::new()
    };

    ($($component:expr),+ $(,)?) => {{
        let mut path = $crate::Path::new();
        $(
            path.push($crate::path::PathComponent::into_segment($component));
        )+
        path
    }};
}

/// Conversion used by the [`path!`] macro.
pub trait PathComponent {
    fn into_segment(self) -> Segment;
}

impl PathComponent for &str {
    fn into_segment(self) -> Segment {
        Segment::Key(self.to_string())
    }
}

impl PathComponent for String {
    fn into_segment(self) -> Segment {
        Segment::Key(self)
    }
}

impl PathComponent for &String {
    fn into_segment(self) -> Segment {
        Segment::Key(self.clone())
    }
}

impl PathComponent for usize {
    fn into_segment(self) -> Segment {
        Segment::Index(self)
    }
}

impl PathComponent for i32 {
    fn into_segment(self) -> Segment {
        Segment::from(self)
    }
}

impl PathComponent for Segment {
    fn into_segment(self) -> Segment {
        self
    }
}
