//! Settings for locating the message frame.

use std::fmt;
use std::str::FromStr;

use crate::{Error, ErrorKind};

/// The character that starts a git comment line (`core.commentChar`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct CommentChar(char);

impl CommentChar {
    /// `#`, git's default.
    pub const HASH: CommentChar = CommentChar('#');

    /// Validate `c` as a comment leader.
    ///
    /// # Errors
    ///
    /// Whitespace can't start a comment, since a whitespace-only line is
    /// blank.
    pub fn new(c: char) -> Result<Self, Error> {
        if c.is_whitespace() || c.is_control() {
            return Err(Error::new(ErrorKind::InvalidCommentChar).set_context(format!("{c:?}")));
        }
        Ok(Self(c))
    }

    /// The character itself.
    pub const fn as_char(self) -> char {
        self.0
    }

    /// Whether `line` is a comment.
    pub fn is_comment(self, line: &str) -> bool {
        line.starts_with(self.0)
    }
}

impl Default for CommentChar {
    fn default() -> Self {
        Self::HASH
    }
}

impl fmt::Display for CommentChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for CommentChar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => CommentChar::new(c),
            _ => Err(Error::new(ErrorKind::InvalidCommentChar).set_context(format!("{s:?}"))),
        }
    }
}

impl TryFrom<String> for CommentChar {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CommentChar> for String {
    fn from(c: CommentChar) -> Self {
        c.0.to_string()
    }
}

/// How commit messages are framed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "kebab-case")
)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Config {
    #[cfg_attr(feature = "schemars", schemars(with = "String"))]
    comment_char: CommentChar,
}

impl Config {
    /// The default configuration, `#` comments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `comment_char` to recognize comment lines.
    pub fn with_comment_char(mut self, comment_char: CommentChar) -> Self {
        self.comment_char = comment_char;
        self
    }

    /// The comment leader.
    pub fn comment_char(&self) -> CommentChar {
        self.comment_char
    }
}
