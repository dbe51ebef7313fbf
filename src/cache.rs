//! Memoized line classification for documents being edited.

use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use crate::{Config, Document, LineKind, MessageFrame};

/// Caches the [`MessageFrame`] of each document and the [`LineKind`] of every
/// line asked about.
///
/// The cache does not watch documents. The host must call
/// [`invalidate`](Self::invalidate) whenever a document changes or closes,
/// before classifying it again; otherwise results describe the old content.
///
/// ```rust
/// use commit_frame::{ClassificationCache, Document, LineKind, TextDocument};
///
/// let mut cache = ClassificationCache::default();
/// let mut doc = TextDocument::new("COMMIT_EDITMSG", "feat: add thing\n\nCloses #1");
/// assert_eq!(cache.classify(&doc, 2), LineKind::FOOTER);
///
/// doc.set_line(1, "oops");
/// cache.invalidate(doc.id());
/// assert_eq!(cache.classify(&doc, 2), LineKind::NONE);
/// ```
#[derive(Debug)]
pub struct ClassificationCache<K> {
    config: Config,
    documents: HashMap<K, DocumentEntry>,
}

#[derive(Debug)]
struct DocumentEntry {
    frame: MessageFrame,
    lines: HashMap<usize, LineKind>,
}

impl<K> ClassificationCache<K>
where
    K: Eq + Hash + Clone,
{
    /// An empty cache locating frames with `config`.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            documents: HashMap::new(),
        }
    }

    /// The configuration frames are located with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The role of `line` in `document`.
    pub fn classify<D>(&mut self, document: &D, line: usize) -> LineKind
    where
        D: Document<Id = K> + ?Sized,
    {
        let entry = self.entry(document);
        if let Some(kind) = entry.lines.get(&line) {
            tracing::trace!(line, ?kind, "line kind cache hit");
            return *kind;
        }

        let kind = entry.frame.line_kind(line);
        entry.lines.insert(line, kind);
        tracing::trace!(line, ?kind, "line kind cache miss");
        kind
    }

    /// The frame of `document`, located on first use.
    pub fn frame<D>(&mut self, document: &D) -> &MessageFrame
    where
        D: Document<Id = K> + ?Sized,
    {
        &self.entry(document).frame
    }

    /// Forget everything known about the document `id`.
    ///
    /// Returns whether anything was cached for it.
    pub fn invalidate<Q>(&mut self, id: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let removed = self.documents.remove(id).is_some();
        tracing::trace!(removed, "invalidated document");
        removed
    }

    /// Forget every document.
    pub fn clear(&mut self) {
        tracing::trace!(documents = self.documents.len(), "cleared classification cache");
        self.documents.clear();
    }

    /// Number of documents with a cached frame.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no document is cached.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn entry<D>(&mut self, document: &D) -> &mut DocumentEntry
    where
        D: Document<Id = K> + ?Sized,
    {
        match self.documents.entry(document.id().clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let frame = MessageFrame::locate(document, &self.config);
                tracing::debug!(
                    summary = ?frame.summary(),
                    body = frame.body().len(),
                    footer = frame.footer().len(),
                    "located message frame"
                );
                entry.insert(DocumentEntry {
                    frame,
                    lines: HashMap::new(),
                })
            }
        }
    }
}

impl<K> Default for ClassificationCache<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{classify_line, CommentChar, TextDocument};
    use indoc::indoc;

    fn classify_all(cache: &mut ClassificationCache<String>, doc: &TextDocument) -> Vec<LineKind> {
        (0..doc.line_count()).map(|i| cache.classify(doc, i)).collect()
    }

    #[test]
    fn test_classify_end_to_end() {
        let mut cache = ClassificationCache::default();
        let doc = TextDocument::from_lines("msg", ["", "feat: add thing", "", "Closes #1"]);

        assert_eq!(
            classify_all(&mut cache, &doc),
            [
                LineKind::NONE,
                LineKind::SUMMARY,
                LineKind::NONE,
                LineKind::FOOTER
            ]
        );
        assert_eq!(cache.frame(&doc).summary(), Some(1));
        assert!(cache.frame(&doc).body().is_empty());
        assert_eq!(cache.frame(&doc).footer(), [3]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_matches_uncached_classification() {
        let mut cache = ClassificationCache::default();
        let doc = TextDocument::new(
            "msg",
            indoc! {"
                # Please enter the commit message for your changes.
                refactor(frame)!: model footer start as a state machine

                Three optional candidates were hard to audit.

                BREAKING CHANGE: `FooterStart` replaces the candidate offsets
                Refs: 676104e
            "},
        );

        for line in 0..doc.line_count() + 2 {
            assert_eq!(
                cache.classify(&doc, line),
                classify_line(&doc, line, &Config::default()),
                "line {line}"
            );
        }
    }

    #[test]
    fn test_cached_until_invalidated() {
        let mut cache = ClassificationCache::default();
        let mut doc = TextDocument::from_lines("msg", ["", "feat"]);
        assert_eq!(cache.classify(&doc, 1), LineKind::SUMMARY);

        doc.set_line(0, "fix: y");
        assert_eq!(cache.classify(&doc, 1), LineKind::SUMMARY);

        assert!(cache.invalidate(doc.id()));
        assert_eq!(cache.classify(&doc, 1), LineKind::NONE);
        assert_eq!(cache.classify(&doc, 0), LineKind::SUMMARY);
    }

    #[test]
    fn test_frame_cached_until_invalidated() {
        let mut cache = ClassificationCache::default();
        let mut doc = TextDocument::from_lines("msg", ["feat: x", "", "Closes #1"]);
        assert_eq!(cache.classify(&doc, 2), LineKind::FOOTER);

        doc.set_line(1, "not blank");
        // never asked about line 0 before, but the frame is still the old one
        assert_eq!(cache.classify(&doc, 0), LineKind::SUMMARY);
        assert_eq!(cache.frame(&doc).footer(), [2]);

        cache.invalidate("msg");
        assert_eq!(cache.classify(&doc, 2), LineKind::NONE);
        assert!(cache.frame(&doc).footer().is_empty());
    }

    #[test]
    fn test_reclassify_after_invalidate_is_stable() {
        let mut cache = ClassificationCache::default();
        let doc = TextDocument::new(
            "msg",
            indoc! {"
                docs: explain the cache

                Invalidation is the host's job.

                Closes #3
            "},
        );

        let before = classify_all(&mut cache, &doc);
        cache.invalidate(doc.id());
        assert!(cache.is_empty());
        let after = classify_all(&mut cache, &doc);
        assert_eq!(before, after);
    }

    #[test]
    fn test_documents_are_independent() {
        let mut cache = ClassificationCache::default();
        let a = TextDocument::from_lines("a", ["feat: x", "", "Closes #1"]);
        let b = TextDocument::from_lines("b", ["# c", "fix: y"]);

        assert_eq!(cache.classify(&a, 2), LineKind::FOOTER);
        assert_eq!(cache.classify(&b, 1), LineKind::SUMMARY);
        assert_eq!(cache.len(), 2);

        assert!(cache.invalidate("a"));
        assert!(!cache.invalidate("a"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.classify(&b, 0), LineKind::NONE);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_uses_config() {
        let config = Config::new().with_comment_char(CommentChar::new(';').unwrap());
        let mut cache = ClassificationCache::new(config);
        let doc = TextDocument::from_lines("msg", ["; comment", "# not a comment"]);

        assert_eq!(cache.config().comment_char().as_char(), ';');
        assert_eq!(cache.classify(&doc, 0), LineKind::NONE);
        assert_eq!(cache.classify(&doc, 1), LineKind::SUMMARY);
    }
}
