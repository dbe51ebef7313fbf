//! Small editing helpers built on the tokenizers.

use std::ops::Range;

use crate::{parse_footer, parse_summary, parser, Reference, Stage};

/// Replace `range` of a line with `text`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SeparatorEdit {
    range: Range<usize>,
    text: &'static str,
}

impl SeparatorEdit {
    /// Byte range of the line to replace.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Replacement text.
    pub fn text(&self) -> &'static str {
        self.text
    }

    /// `line` with the edit applied.
    pub fn apply(&self, line: &str) -> String {
        let mut edited = line.to_owned();
        edited.replace_range(self.range(), self.text);
        edited
    }
}

/// Normalize the separator a user just started typing on a summary line.
///
/// `cursor` is the byte offset of the `':'` that was typed. After a type or
/// a closed scope the run of `:` and spaces there becomes `": "`; after an
/// unclosed scope the scope is closed as well.
///
/// ```rust
/// use commit_frame::separator_edit;
///
/// let edit = separator_edit("feat(api:", 8).unwrap();
/// assert_eq!(edit.apply("feat(api:"), "feat(api): ");
///
/// let edit = separator_edit("fix:: :x", 3).unwrap();
/// assert_eq!(edit.apply("fix:: :x"), "fix: x");
///
/// assert_eq!(separator_edit("fix: done:", 9), None);
/// ```
pub fn separator_edit(line: &str, cursor: usize) -> Option<SeparatorEdit> {
    let leading = line.get(..cursor)?;
    let run = parser::separator_run(&line[cursor..])?;
    let text = match parse_summary(leading).stage() {
        Stage::Type | Stage::Scope => ": ",
        Stage::Partial => "): ",
        Stage::Empty | Stage::Error | Stage::Description => return None,
    };

    Some(SeparatorEdit {
        range: cursor..cursor + run,
        text,
    })
}

/// Whether `scope` is a complete scope token such as `api`, `ui.button` or
/// `$user-defined`.
pub fn is_valid_scope(scope: &str) -> bool {
    let mut i = scope;
    parser::scope_token(&mut i).is_ok()
}

/// Whether the footer text up to and including a just-typed `'#'` should
/// offer issue numbers.
///
/// ```rust
/// use commit_frame::triggers_issue_lookup;
///
/// assert!(triggers_issue_lookup("Closes #"));
/// assert!(!triggers_issue_lookup("Refs #"));
/// ```
pub fn triggers_issue_lookup(leading: &str) -> bool {
    let tokens = parse_footer(leading);
    tokens.stage() == Stage::Description && tokens.footer_token().reference() == Some(Reference::Issue)
}
