// WASM bindings for translation memory matching and message group states.
//
// Exports free functions for edit distance and suggestion ranking, plus
// two classes: `WasmGroupStates` wraps a parsed group state configuration
// and `WasmTranslationMemory` wraps the in-memory translation memory.
// Structured values cross the boundary through serde-wasm-bindgen.
//
// Usage from JavaScript:
//
//   editDistance("kitten", "sitting");           // => 3
//   rankSuggestions([{ text: "a", quality: 0.8 }, { text: "b", quality: 0.9 }]);
//                                                // => [{ text: "b", ... }, { text: "a", ... }]
//
//   const states = new WasmGroupStates(configJson);
//   states.evaluate("core", { total: 10, translated: 10, fuzzy: 0, proofread: 10 });
//                                                // => "ready"
//
//   const tm = new WasmTranslationMemory();
//   tm.update({ context: "app:hi", sourceLanguage: "en", source: "Hello",
//               targetLanguage: "fi", target: "Hei" });
//   tm.query("en", "fi", "Hello!");              // => [{ text: "Hei", quality: 0.82, ... }]

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use translate_core::{Candidate, StatSnapshot, Suggestion};
use translate_states::{ConfiguredGroups, GroupRegistry, evaluate};
use translate_ttm::{MemoryTtmServer, QueryOptions, TtmEntry, TtmServer, WritableTtmServer};

// ============================================================================
// Serde-serializable DTO types for JS interop
// ============================================================================

/// Serializable representation of a translation memory suggestion.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsSuggestion {
    text: String,
    quality: f64,
    context: String,
    source: String,
    service: String,
}

/// Translation to store, as passed from JavaScript.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsEntry {
    context: String,
    source_language: String,
    source: String,
    target_language: String,
    target: String,
}

impl From<JsEntry> for TtmEntry {
    fn from(e: JsEntry) -> Self {
        TtmEntry {
            context: e.context,
            source_language: e.source_language,
            source: e.source,
            target_language: e.target_language,
            target: e.target,
        }
    }
}

/// Query options, all optional.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct JsQueryOptions {
    threshold: Option<f64>,
    limit: Option<usize>,
    length_window: Option<f64>,
}

// ============================================================================
// Conversion helpers
// ============================================================================

fn to_js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn stats_from_js(stats: JsValue) -> Result<StatSnapshot, JsError> {
    serde_wasm_bindgen::from_value(stats).map_err(to_js_error)
}

// ============================================================================
// Free functions
// ============================================================================

/// Code point edit distance between two strings.
#[wasm_bindgen(js_name = "editDistance")]
pub fn edit_distance(a: &str, b: &str) -> usize {
    translate_ttm::edit_distance(a, b)
}

/// Match quality in `[0, 1]` of two strings `distance` edits apart.
#[wasm_bindgen]
pub fn quality(len_a: usize, len_b: usize, distance: usize) -> f64 {
    translate_ttm::quality(len_a, len_b, distance)
}

/// Sort suggestion objects by their `quality` property, best first.
///
/// Returns the same objects in a new array; equal qualities keep their
/// input order. Throws if a quality is missing or outside `[0, 1]`.
#[wasm_bindgen(js_name = "rankSuggestions")]
pub fn rank_suggestions(suggestions: js_sys::Array) -> Result<js_sys::Array, JsError> {
    let key = JsValue::from_str("quality");
    let mut ranked = Vec::with_capacity(suggestions.length() as usize);
    for item in suggestions.iter() {
        let quality = js_sys::Reflect::get(&item, &key)
            .ok()
            .and_then(|q| q.as_f64())
            .ok_or_else(|| JsError::new("suggestion has no numeric quality"))?;
        ranked.push(Suggestion::new(Candidate::new("", item), quality).map_err(to_js_error)?);
    }
    translate_ttm::sort_suggestions(&mut ranked);
    Ok(ranked
        .into_iter()
        .map(|s| s.into_candidate().metadata)
        .collect())
}

/// Percentage breakdown of `{ total, translated, fuzzy, proofread }`.
#[wasm_bindgen(js_name = "statsBreakdown")]
pub fn stats_breakdown(stats: JsValue) -> Result<JsValue, JsError> {
    let stats = stats_from_js(stats)?;
    serde_wasm_bindgen::to_value(&stats.breakdown()).map_err(to_js_error)
}

// ============================================================================
// WasmGroupStates
// ============================================================================

/// Message group state transitions parsed from a JSON configuration.
#[wasm_bindgen]
pub struct WasmGroupStates {
    groups: ConfiguredGroups,
}

#[wasm_bindgen]
impl WasmGroupStates {
    /// Parse a configuration of the form
    /// `{"groups": {"<id>": {"transitions": [["<state>", {"<KIND>": "<TEST>"}]]}}}`.
    ///
    /// Throws on unknown condition kinds or tests.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmGroupStates, JsError> {
        let groups = ConfiguredGroups::from_json(config_json).map_err(to_js_error)?;
        Ok(WasmGroupStates { groups })
    }

    /// State of `group` for `{ total, translated, fuzzy, proofread }`.
    ///
    /// Returns `undefined` when the group is unknown or no transition
    /// matches. Throws on inconsistent statistics.
    pub fn evaluate(&self, group: &str, stats: JsValue) -> Result<Option<String>, JsError> {
        let stats = stats_from_js(stats)?;
        Ok(self
            .groups
            .transitions(group)
            .and_then(|table| evaluate(&stats, table))
            .map(str::to_string))
    }

    /// Whether `group` has a state configuration.
    #[wasm_bindgen(js_name = "hasGroup")]
    pub fn has_group(&self, group: &str) -> bool {
        self.groups.contains(group)
    }
}

// ============================================================================
// WasmTranslationMemory
// ============================================================================

/// In-memory translation memory with fuzzy lookup.
#[wasm_bindgen]
pub struct WasmTranslationMemory {
    server: MemoryTtmServer,
}

#[wasm_bindgen]
impl WasmTranslationMemory {
    /// Create an empty memory. `options` may set `threshold`, `limit` and
    /// `lengthWindow`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<WasmTranslationMemory, JsError> {
        let js: JsQueryOptions = if options.is_undefined() || options.is_null() {
            JsQueryOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options).map_err(to_js_error)?
        };
        let defaults = QueryOptions::default();
        let options = QueryOptions {
            threshold: js.threshold.unwrap_or(defaults.threshold),
            limit: js.limit.unwrap_or(defaults.limit),
            length_window: js.length_window.unwrap_or(defaults.length_window),
        };
        Ok(WasmTranslationMemory {
            server: MemoryTtmServer::new("wasm").with_options(options),
        })
    }

    /// Store a translation, replacing an earlier one for the same context
    /// and target language.
    pub fn update(&mut self, entry: JsValue) -> Result<(), JsError> {
        let entry: JsEntry = serde_wasm_bindgen::from_value(entry).map_err(to_js_error)?;
        self.server.update(entry.into()).map_err(to_js_error)
    }

    /// Forget every translation of `context`.
    pub fn delete(&mut self, context: &str) -> Result<(), JsError> {
        self.server.delete(context).map_err(to_js_error)
    }

    /// Suggestions for `text`, best first.
    pub fn query(
        &self,
        source_language: &str,
        target_language: &str,
        text: &str,
    ) -> Result<JsValue, JsError> {
        let suggestions: Vec<JsSuggestion> = self
            .server
            .query(source_language, target_language, text)
            .map_err(to_js_error)?
            .into_iter()
            .map(|s| {
                let quality = s.quality();
                let candidate = s.into_candidate();
                JsSuggestion {
                    text: candidate.text,
                    quality,
                    context: candidate.metadata.context,
                    source: candidate.metadata.source,
                    service: candidate.metadata.service,
                }
            })
            .collect();
        serde_wasm_bindgen::to_value(&suggestions).map_err(to_js_error)
    }

    /// Number of distinct stored sources.
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.server.source_count()
    }
}
