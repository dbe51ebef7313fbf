//! Locating the summary, body and footer lines of a commit message.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::{parse_footer, parser, CommentChar, Config, Document, Stage};

/// The structural role of a line, as a set of bits.
///
/// [`LineKind::BODY`] and [`LineKind::FOOTER`] are never both set by this
/// crate.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct LineKind(u8);

impl LineKind {
    /// Not part of the message: comments, the separator after the summary,
    /// anything before the summary.
    pub const NONE: LineKind = LineKind(0x00);
    /// The summary line.
    pub const SUMMARY: LineKind = LineKind(0x01);
    /// Free-form body text.
    pub const BODY: LineKind = LineKind(0x02);
    /// A trailer such as `Closes #42`.
    pub const FOOTER: LineKind = LineKind(0x04);

    /// The raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether no bit is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every bit of `other` is set in `self`.
    pub const fn contains(self, other: LineKind) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether `self` and `other` share a bit.
    pub const fn intersects(self, other: LineKind) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for LineKind {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for LineKind {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        let names = [
            (LineKind::SUMMARY, "SUMMARY"),
            (LineKind::BODY, "BODY"),
            (LineKind::FOOTER, "FOOTER"),
        ];
        let mut first = true;
        for (kind, name) in names {
            if self.contains(kind) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Where the summary, body and footers of one document are.
///
/// Line numbers are only meaningful for the content the frame was located
/// in; any edit makes the frame stale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageFrame {
    summary: Option<usize>,
    body: Vec<usize>,
    footer: Vec<usize>,
}

impl MessageFrame {
    /// Scan `document` for its summary, body and footer lines.
    ///
    /// ```rust
    /// use commit_frame::{Config, MessageFrame, TextDocument};
    /// use indoc::indoc;
    ///
    /// let doc = TextDocument::new("COMMIT_EDITMSG", indoc! {"
    ///     fix(parser): accept a lone colon
    ///
    ///     The summary grammar now treats a trailing ':' as a separator
    ///     that is still being typed.
    ///
    ///     Closes #7
    ///     # Please enter the commit message for your changes.
    /// "});
    /// let frame = MessageFrame::locate(&doc, &Config::default());
    ///
    /// assert_eq!(frame.summary(), Some(0));
    /// assert_eq!(frame.body(), [2, 3]);
    /// assert_eq!(frame.footer(), [5, 7]);
    /// ```
    pub fn locate<D: Document + ?Sized>(document: &D, config: &Config) -> Self {
        let comment = config.comment_char();
        let Some(summary) = find_summary_line(document, comment) else {
            return Self::default();
        };
        let (body, footer) = find_body_footer_lines(document, summary, comment);

        Self {
            summary: Some(summary),
            body,
            footer,
        }
    }

    /// The summary line, if the document has any non-comment line.
    pub fn summary(&self) -> Option<usize> {
        self.summary
    }

    /// Body lines, in ascending order.
    pub fn body(&self) -> &[usize] {
        &self.body
    }

    /// Footer lines, in ascending order.
    pub fn footer(&self) -> &[usize] {
        &self.footer
    }

    /// The role of `line` within this frame.
    pub fn line_kind(&self, line: usize) -> LineKind {
        match self.summary {
            None => LineKind::NONE,
            Some(summary) if line < summary => LineKind::NONE,
            Some(summary) if line == summary => LineKind::SUMMARY,
            Some(_) => {
                let mut kind = LineKind::NONE;
                if self.body.binary_search(&line).is_ok() {
                    kind |= LineKind::BODY;
                }
                if self.footer.binary_search(&line).is_ok() {
                    kind |= LineKind::FOOTER;
                }
                kind
            }
        }
    }
}

/// Classify a single line without caching.
///
/// This locates the whole frame on every call; see
/// [`ClassificationCache`](crate::ClassificationCache) for repeated queries.
pub fn classify_line<D: Document + ?Sized>(document: &D, line: usize, config: &Config) -> LineKind {
    MessageFrame::locate(document, config).line_kind(line)
}

/// The first non-comment, non-blank line.
///
/// Without one, the first blank non-comment line is used so an empty message
/// still has a place for its summary.
fn find_summary_line<D: Document + ?Sized>(document: &D, comment: CommentChar) -> Option<usize> {
    let mut first_blank = None;
    for i in 0..document.line_count() {
        if comment.is_comment(document.line(i)) {
            continue;
        }
        if !document.is_blank(i) {
            return Some(i);
        }
        first_blank.get_or_insert(i);
    }
    first_blank
}

fn find_body_footer_lines<D: Document + ?Sized>(
    document: &D,
    summary: usize,
    comment: CommentChar,
) -> (Vec<usize>, Vec<usize>) {
    if document.is_blank(summary) {
        return Default::default();
    }
    // The body MUST begin one blank line after the summary.
    let separator = summary + 1;
    if document.line_count() <= separator || !document.is_blank(separator) {
        return Default::default();
    }

    let mut scanned = Vec::new();
    let mut start = FooterStart::NoCandidate;
    let mut previous: Option<&str> = None;
    for i in separator + 1..document.line_count() {
        let text = document.line(i);
        if comment.is_comment(text) {
            continue;
        }
        let blank = document.is_blank(i);

        start = match previous {
            None => start.after_blank(scanned.len(), blank, text),
            Some(previous) => start.after_text(previous),
        };

        scanned.push(i);
        previous = (!blank).then_some(text);
    }

    tracing::trace!(?start, scanned = scanned.len(), "resolved footer start");
    start.split(scanned)
}

/// Where the footers begin, as an offset into the scanned lines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FooterStart {
    /// Nothing looks like a footer yet.
    NoCandidate,
    /// Fallback: a blank line right after another blank line.
    Empty(usize),
    /// A paragraph that may be footers, kept while every line of it parses as
    /// a bare token.
    Greedy(usize),
    /// A paragraph starting with an unmistakable footer. Final.
    Matched(usize),
}

impl FooterStart {
    /// Transition for the line at `here` when the previous line was blank or
    /// the region just started.
    fn after_blank(self, here: usize, blank: bool, text: &str) -> Self {
        match self {
            FooterStart::Matched(_) => self,
            FooterStart::NoCandidate if blank => FooterStart::Empty(here),
            _ if blank => self,
            _ if parser::is_footer_line(text) => FooterStart::Matched(here),
            FooterStart::NoCandidate | FooterStart::Empty(_) => FooterStart::Greedy(here),
            FooterStart::Greedy(_) => self,
        }
    }

    /// Transition for a line following the non-blank `previous` one.
    fn after_text(self, previous: &str) -> Self {
        match self {
            FooterStart::Matched(_) => self,
            FooterStart::Greedy(_) if parse_footer(previous).stage() == Stage::Type => self,
            _ => FooterStart::NoCandidate,
        }
    }

    /// Split the scanned lines into body and footer.
    fn split(self, mut scanned: Vec<usize>) -> (Vec<usize>, Vec<usize>) {
        match self {
            FooterStart::NoCandidate => (scanned, Vec::new()),
            FooterStart::Greedy(at) => {
                let footer = scanned.split_off(at);
                (scanned, footer)
            }
            FooterStart::Matched(at) | FooterStart::Empty(at) => {
                let footer = scanned.split_off(at);
                // the line before the footers separates them from the body
                scanned.truncate(at.saturating_sub(1));
                (scanned, footer)
            }
        }
    }
}
