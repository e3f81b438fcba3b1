// Translation memory backends: query/write traits and the in-memory store
// Origin: ttmserver/TTMServer.php

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use translate_core::{Candidate, Suggestion};

use crate::TtmError;
use crate::levenshtein::levenshtein;
use crate::rank::{quality, sort_suggestions};

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// One translation to store: `source` in `source_language` translated to
/// `target` in `target_language`, for the message identified by `context`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtmEntry {
    pub context: String,
    pub source_language: String,
    pub source: String,
    pub target_language: String,
    pub target: String,
}

/// Where a suggested translation came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtmMatch {
    /// Message the translation belongs to.
    pub context: String,
    /// Source text that was matched against the query.
    pub source: String,
    /// Name of the service that produced the match.
    pub service: String,
}

/// Tunables for a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryOptions {
    /// Suggestions below this quality are dropped.
    pub threshold: f64,
    /// Maximum number of suggestions returned.
    pub limit: usize,
    /// Candidate sources must have a length (in code points) within
    /// `[len * (1 - length_window), len * (1 + length_window)]`.
    pub length_window: f64,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            threshold: 0.75,
            limit: 5,
            length_window: 0.25,
        }
    }
}

impl QueryOptions {
    /// Inclusive code point length range worth comparing against.
    pub fn length_range(&self, len: usize) -> (usize, usize) {
        let len = len as f64;
        let min = (len * (1.0 - self.length_window)).floor().max(0.0) as usize;
        let max = (len * (1.0 + self.length_window)).ceil() as usize;
        (min, max)
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// A translation memory that can be queried for suggestions.
pub trait TtmServer {
    /// Service name from configuration.
    fn name(&self) -> &str;

    /// Suggestions for translating `text` from `source_language` to
    /// `target_language`, best first.
    fn query(
        &self,
        source_language: &str,
        target_language: &str,
        text: &str,
    ) -> Result<Vec<Suggestion<TtmMatch>>, TtmError>;

    /// Names of the services that receive copies of every write.
    fn mirrors(&self) -> &[String];

    /// A frozen service is queried but never written to.
    fn is_frozen(&self) -> bool {
        false
    }

    /// Write access, if the backend supports it.
    fn writer(&mut self) -> Option<&mut dyn WritableTtmServer> {
        None
    }
}

/// Write side of a translation memory.
pub trait WritableTtmServer {
    /// Store a translation, replacing the earlier translation of the same
    /// message into the same language.
    fn update(&mut self, entry: TtmEntry) -> Result<(), TtmError>;

    /// Forget every translation of the message identified by `context`.
    fn delete(&mut self, context: &str) -> Result<(), TtmError>;
}

// ---------------------------------------------------------------------------
// MemoryTtmServer
// ---------------------------------------------------------------------------

/// A stored source text with its translations keyed by language.
#[derive(Debug, Clone)]
struct SourceRow {
    context: String,
    language: String,
    text: String,
    /// Length of `text` in code points.
    len: usize,
    targets: HashMap<String, String>,
}

/// Translation memory kept in process memory.
///
/// Queries compare the input against every stored source of the right
/// language and length, so cost grows linearly with the store.
#[derive(Debug, Clone)]
pub struct MemoryTtmServer {
    name: String,
    mirrors: Vec<String>,
    frozen: bool,
    options: QueryOptions,
    sources: Vec<SourceRow>,
}

impl MemoryTtmServer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mirrors: Vec::new(),
            frozen: false,
            options: QueryOptions::default(),
            sources: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_mirrors(mut self, mirrors: Vec<String>) -> Self {
        self.mirrors = mirrors;
        self
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Number of stored source texts.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    fn check_writable(&self) -> Result<(), TtmError> {
        if self.frozen {
            return Err(TtmError::Frozen(self.name.clone()));
        }
        Ok(())
    }
}

impl TtmServer for MemoryTtmServer {
    fn name(&self) -> &str {
        &self.name
    }

    fn query(
        &self,
        source_language: &str,
        target_language: &str,
        text: &str,
    ) -> Result<Vec<Suggestion<TtmMatch>>, TtmError> {
        let len = text.chars().count();
        let (min_len, max_len) = self.options.length_range(len);

        let mut suggestions = Vec::new();
        for row in &self.sources {
            if row.language != source_language || row.len < min_len || row.len > max_len {
                continue;
            }
            let Some(target) = row.targets.get(target_language) else {
                continue;
            };
            let distance = levenshtein(text, &row.text, len, row.len);
            let q = quality(len, row.len, distance);
            if q < self.options.threshold {
                continue;
            }
            let metadata = TtmMatch {
                context: row.context.clone(),
                source: row.text.clone(),
                service: self.name.clone(),
            };
            suggestions.push(Suggestion::new(Candidate::new(target.as_str(), metadata), q)?);
        }

        sort_suggestions(&mut suggestions);
        suggestions.truncate(self.options.limit);
        tracing::debug!(
            service = %self.name,
            source_language,
            target_language,
            matches = suggestions.len(),
            "translation memory query"
        );
        Ok(suggestions)
    }

    fn mirrors(&self) -> &[String] {
        &self.mirrors
    }

    fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn writer(&mut self) -> Option<&mut dyn WritableTtmServer> {
        Some(self)
    }
}

impl WritableTtmServer for MemoryTtmServer {
    fn update(&mut self, entry: TtmEntry) -> Result<(), TtmError> {
        self.check_writable()?;

        // The source of a message may have changed since it was last
        // translated; drop the old translation wherever it is stored.
        for row in self.sources.iter_mut().filter(|r| r.context == entry.context) {
            row.targets.remove(&entry.target_language);
        }
        self.sources.retain(|r| !r.targets.is_empty() || r.context != entry.context);

        let existing = self.sources.iter_mut().find(|r| {
            r.context == entry.context
                && r.language == entry.source_language
                && r.text == entry.source
        });
        match existing {
            Some(row) => {
                row.targets.insert(entry.target_language, entry.target);
            }
            None => {
                let mut targets = HashMap::new();
                targets.insert(entry.target_language, entry.target);
                self.sources.push(SourceRow {
                    len: entry.source.chars().count(),
                    context: entry.context,
                    language: entry.source_language,
                    text: entry.source,
                    targets,
                });
            }
        }
        Ok(())
    }

    fn delete(&mut self, context: &str) -> Result<(), TtmError> {
        self.check_writable()?;
        let before = self.sources.len();
        self.sources.retain(|r| r.context != context);
        tracing::debug!(
            service = %self.name,
            context,
            removed = before - self.sources.len(),
            "translation memory delete"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(context: &str, source: &str, lang: &str, target: &str) -> TtmEntry {
        TtmEntry {
            context: context.to_string(),
            source_language: "en".to_string(),
            source: source.to_string(),
            target_language: lang.to_string(),
            target: target.to_string(),
        }
    }

    fn server() -> MemoryTtmServer {
        let mut s = MemoryTtmServer::new("memory");
        s.update(entry("core:save", "Save page", "fi", "Tallenna sivu"))
            .unwrap();
        s.update(entry("core:save-changes", "Save pages", "fi", "Tallenna sivut"))
            .unwrap();
        s.update(entry("core:delete", "Delete page", "fi", "Poista sivu"))
            .unwrap();
        s.update(entry("core:save", "Save page", "de", "Seite speichern"))
            .unwrap();
        s
    }

    #[test]
    fn length_range_is_inclusive_window() {
        let options = QueryOptions::default();
        assert_eq!(options.length_range(8), (6, 10));
        assert_eq!(options.length_range(0), (0, 0));
    }

    #[test]
    fn exact_match_ranks_first() {
        let s = server();
        let results = s.query("en", "fi", "Save page").unwrap();
        assert_eq!(results[0].text(), "Tallenna sivu");
        assert_eq!(results[0].quality(), 1.0);
        assert_eq!(results[0].metadata().context, "core:save");
        assert_eq!(results[0].metadata().service, "memory");
        assert_eq!(results[1].text(), "Tallenna sivut");
    }

    #[test]
    fn dissimilar_sources_are_filtered() {
        let s = server();
        let results = s.query("en", "fi", "Save page").unwrap();
        assert!(results.iter().all(|r| r.text() != "Poista sivu"));
    }

    #[test]
    fn only_requested_target_language() {
        let s = server();
        let results = s.query("en", "de", "Save page").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text(), "Seite speichern");
    }

    #[test]
    fn wrong_source_language_finds_nothing() {
        let s = server();
        assert!(s.query("sv", "fi", "Save page").unwrap().is_empty());
    }

    #[test]
    fn limit_truncates() {
        let s = server().with_options(QueryOptions {
            limit: 1,
            ..QueryOptions::default()
        });
        assert_eq!(s.query("en", "fi", "Save page").unwrap().len(), 1);
    }

    #[test]
    fn update_replaces_translation_of_changed_source() {
        let mut s = server();
        s.update(entry("core:save", "Save this page", "fi", "Tallenna tämä sivu"))
            .unwrap();
        let old = s.query("en", "fi", "Save page").unwrap();
        assert!(old.iter().all(|r| r.metadata().context != "core:save"));
        let new = s.query("en", "fi", "Save this page").unwrap();
        assert_eq!(new[0].text(), "Tallenna tämä sivu");
        // The German translation of the old source is untouched.
        assert_eq!(s.query("en", "de", "Save page").unwrap().len(), 1);
    }

    #[test]
    fn delete_removes_context() {
        let mut s = server();
        s.delete("core:save").unwrap();
        assert!(s.query("en", "de", "Save page").unwrap().is_empty());
        assert_eq!(s.source_count(), 2);
    }

    #[test]
    fn frozen_server_rejects_writes() {
        let mut s = server();
        s.set_frozen(true);
        assert!(s.is_frozen());
        let err = s.delete("core:save").unwrap_err();
        assert!(matches!(err, TtmError::Frozen(ref name) if name == "memory"));
        assert!(s.update(entry("x", "y", "fi", "z")).is_err());
        // Still queryable.
        assert!(!s.query("en", "fi", "Save page").unwrap().is_empty());
    }
}
