//! Field paths used to name violations of nested values.
//!
//! A violation on a top-level field is named after the field (`name`). Fields
//! of nested validators are prefixed with their parent (`address.city`) and
//! elements of collections carry their index (`items[0].name`). The
//! separator between fields is configurable on the validator builder.

use std::fmt::{self, Display};

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named field (`address`).
    Field(String),
    /// A position inside a collection (`[0]`).
    Index(usize),
}

/// The location of a field inside the validated value.
///
/// # Example
///
/// ```rust
/// use verdict::FieldPath;
///
/// let path = FieldPath::root().field("items").index(0).field("name");
/// assert_eq!(path.to_string(), "items[0].name");
/// assert_eq!(path.render("_"), "items[0]_name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty path of the validated value itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with a field appended.
    pub fn field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index appended.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns true if this path has no segments.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Renders the path with `separator` between fields.
    pub fn render(&self, separator: &str) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        out.push_str(separator);
                    }
                    out.push_str(name);
                }
                PathSegment::Index(idx) => {
                    out.push('[');
                    out.push_str(&idx.to_string());
                    out.push(']');
                }
            }
        }
        out
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render("."))
    }
}
