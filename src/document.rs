//! The view of an editor buffer the locator works on.

use std::hash::Hash;

/// A read-only sequence of lines with a stable identity.
///
/// Hosts implement this over their own buffer type. Two handles to the same
/// buffer must report equal ids; different buffers must never share one.
pub trait Document {
    /// Cache key for this document, typically a path or URI.
    type Id: Eq + Hash + Clone;

    /// The identity of this document.
    fn id(&self) -> &Self::Id;

    /// Number of lines, including a trailing empty one.
    fn line_count(&self) -> usize;

    /// Text of line `index`, without its terminator.
    fn line(&self, index: usize) -> &str;

    /// Whether line `index` is empty or whitespace only.
    fn is_blank(&self, index: usize) -> bool {
        self.line(index).trim().is_empty()
    }
}

impl<D: Document + ?Sized> Document for &D {
    type Id = D::Id;

    fn id(&self) -> &Self::Id {
        (**self).id()
    }

    fn line_count(&self) -> usize {
        (**self).line_count()
    }

    fn line(&self, index: usize) -> &str {
        (**self).line(index)
    }

    fn is_blank(&self, index: usize) -> bool {
        (**self).is_blank(index)
    }
}

/// An in-memory [`Document`].
///
/// ```rust
/// use commit_frame::{Document, TextDocument};
///
/// let doc = TextDocument::new("COMMIT_EDITMSG", "feat: add thing\r\n\nCloses #1\n");
/// assert_eq!(doc.line_count(), 4);
/// assert_eq!(doc.line(0), "feat: add thing");
/// assert!(doc.is_blank(3));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextDocument {
    id: String,
    lines: Vec<String>,
}

impl TextDocument {
    /// Split `text` into lines on `\n`, dropping a `\r` before it.
    pub fn new(id: impl Into<String>, text: &str) -> Self {
        Self {
            id: id.into(),
            lines: split_lines(text),
        }
    }

    /// Build a document from already split lines.
    pub fn from_lines<I, S>(id: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Replace the text of line `index`, appending blank lines as needed.
    ///
    /// Classification caches holding this document must be invalidated
    /// afterwards.
    pub fn set_line(&mut self, index: usize, text: impl Into<String>) {
        if self.lines.len() <= index {
            self.lines.resize_with(index + 1, String::new);
        }
        self.lines[index] = text.into();
    }

    /// Replace the whole content.
    ///
    /// Classification caches holding this document must be invalidated
    /// afterwards.
    pub fn set_text(&mut self, text: &str) {
        self.lines = split_lines(text);
    }

    /// All lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_owned())
        .collect()
}

impl Document for TextDocument {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, index: usize) -> &str {
        self.lines.get(index).map_or("", String::as_str)
    }
}
