//! Line classification for [Conventional Commit] message editors.
//!
//! [conventional commit]: https://www.conventionalcommits.org
//!
//! An editor asks two questions while the user types a commit message: which
//! part of the message is this line (summary, body or footer), and how far
//! along the grammar is the text before the cursor. [`ClassificationCache`]
//! answers the first, [`parse_summary`] and [`parse_footer`] the second.
//!
//! # Example
//!
//! ```rust
//! use commit_frame::{parse_footer, parse_summary, ClassificationCache, Document};
//! use commit_frame::{LineKind, Stage, TextDocument};
//! use indoc::indoc;
//!
//! let mut doc = TextDocument::new("COMMIT_EDITMSG", indoc! {"
//!     docs(example)!: add tested usage example
//!
//!     This example is tested using Rust's doctest capabilities.
//!
//!     BREAKING CHANGE: Going from nothing to something.
//!     Closes #12
//!     # Please enter the commit message for your changes. Lines starting
//!     # with '#' will be ignored, and an empty message aborts the commit.
//! "});
//!
//! let mut cache = ClassificationCache::default();
//! assert_eq!(cache.classify(&doc, 0), LineKind::SUMMARY);
//! assert_eq!(cache.classify(&doc, 2), LineKind::BODY);
//! assert_eq!(cache.classify(&doc, 4), LineKind::FOOTER);
//! assert_eq!(cache.classify(&doc, 6), LineKind::NONE);
//!
//! // Tokenize the text left of the cursor.
//! let tokens = parse_summary(&doc.line(0)[..13]);
//! assert_eq!(tokens.stage(), Stage::Scope);
//! assert_eq!(tokens.scope(), "example");
//!
//! let tokens = parse_footer(doc.line(5));
//! assert_eq!(tokens.type_(), "Closes");
//! assert_eq!(tokens.description(), "12");
//!
//! // Any edit must be reported before classifying again.
//! doc.set_line(1, "no longer blank");
//! cache.invalidate(doc.id());
//! assert_eq!(cache.classify(&doc, 4), LineKind::NONE);
//! ```

#![warn(missing_docs)]

mod assist;
mod cache;
mod config;
mod document;
mod error;
mod frame;
mod parser;
mod tokens;

pub use assist::{is_valid_scope, separator_edit, triggers_issue_lookup, SeparatorEdit};
pub use cache::ClassificationCache;
pub use config::{CommentChar, Config};
pub use document::{Document, TextDocument};
pub use error::{Error, ErrorKind};
pub use frame::{classify_line, LineKind, MessageFrame};
pub use tokens::{
    parse_footer, parse_summary, FooterSeparator, FooterToken, Reference, Stage, Tokens, Type,
};
