// FFI functions are inherently unsafe: callers must ensure pointer validity.
// Safety contracts are documented per-function in the public API comments.
#![allow(clippy::missing_safety_doc)]

// translate-ffi: C-compatible FFI layer for edit distance and group states.
//
// Memory management rules:
// - Opaque `ConfiguredGroups` pointer: created by `translate_states_new`,
//   freed by `translate_states_free`.
// - Returned strings: caller must free with `translate_free_str`.
// - All input strings are UTF-8 encoded, null-terminated C strings.

use std::ffi::{CStr, CString, c_char, c_int};
use std::ptr;

use translate_core::StatSnapshot;
use translate_states::{ConfiguredGroups, GroupRegistry, evaluate};

// ── Edit distance ───────────────────────────────────────────────

/// Code point edit distance between two strings.
///
/// A NULL pointer is treated as the empty string. Returns -1 if either
/// string is not valid UTF-8.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn translate_edit_distance(a: *const c_char, b: *const c_char) -> i64 {
    let (Some(a), Some(b)) = (cstr_or_empty(a), cstr_or_empty(b)) else {
        return -1;
    };
    i64::try_from(translate_ttm::edit_distance(a, b)).unwrap_or(i64::MAX)
}

/// Match quality of two strings of `len_a` and `len_b` code points that
/// are `distance` edits apart. Always within `[0, 1]`.
#[unsafe(no_mangle)]
pub extern "C" fn translate_quality(len_a: usize, len_b: usize, distance: usize) -> f64 {
    translate_ttm::quality(len_a, len_b, distance)
}

// ── Group states ────────────────────────────────────────────────

/// Parse a group state configuration (JSON).
///
/// Returns an opaque pointer on success, NULL on failure.
/// On failure, if `error_out` is non-NULL, it receives a heap-allocated error string
/// that the caller must free with `translate_free_str`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn translate_states_new(
    config_json: *const c_char,
    error_out: *mut *mut c_char,
) -> *mut ConfiguredGroups {
    let Some(json) = cstr_to_str(config_json) else {
        set_error(error_out, "config_json is null or not valid UTF-8");
        return ptr::null_mut();
    };
    match ConfiguredGroups::from_json(json) {
        Ok(groups) => Box::into_raw(Box::new(groups)),
        Err(e) => {
            set_error(error_out, &e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free a configuration created by `translate_states_new`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn translate_states_free(states: *mut ConfiguredGroups) {
    if !states.is_null() {
        drop(unsafe { Box::from_raw(states) });
    }
}

/// Evaluate the state of `group` for the given statistics.
///
/// Returns the state label as a heap-allocated C string (free with
/// `translate_free_str`), or NULL when the group is unknown, no transition
/// matches, or the input is invalid. Invalid input also sets `error_out`
/// when it is non-NULL.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn translate_states_evaluate(
    states: *const ConfiguredGroups,
    group: *const c_char,
    total: u64,
    translated: u64,
    fuzzy: u64,
    proofread: u64,
    error_out: *mut *mut c_char,
) -> *mut c_char {
    let Some(states) = (unsafe { states.as_ref() }) else {
        set_error(error_out, "states is null");
        return ptr::null_mut();
    };
    let Some(group) = cstr_to_str(group) else {
        set_error(error_out, "group is null or not valid UTF-8");
        return ptr::null_mut();
    };
    let stats = match StatSnapshot::new(total, translated, fuzzy, proofread) {
        Ok(stats) => stats,
        Err(e) => {
            set_error(error_out, &e.to_string());
            return ptr::null_mut();
        }
    };
    states
        .transitions(group)
        .and_then(|table| evaluate(&stats, table))
        .map_or(ptr::null_mut(), str_to_c)
}

/// Whether `group` has a state configuration. Returns 1 or 0, -1 on error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn translate_states_has_group(
    states: *const ConfiguredGroups,
    group: *const c_char,
) -> c_int {
    let Some(states) = (unsafe { states.as_ref() }) else {
        return -1;
    };
    let Some(group) = cstr_to_str(group) else {
        return -1;
    };
    if states.contains(group) { 1 } else { 0 }
}

// ── Statistics ──────────────────────────────────────────────────

/// Percentages of a (group, language) pair's messages by status.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TranslateBreakdown {
    pub proofread: f64,
    pub translated: f64,
    pub fuzzy: f64,
    pub untranslated: f64,
}

/// Fill `out` with the percentage breakdown of the given statistics.
/// Returns 0 on success, -1 on invalid statistics or NULL `out`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn translate_stats_breakdown(
    total: u64,
    translated: u64,
    fuzzy: u64,
    proofread: u64,
    out: *mut TranslateBreakdown,
) -> c_int {
    let Some(out) = (unsafe { out.as_mut() }) else {
        return -1;
    };
    let Ok(stats) = StatSnapshot::new(total, translated, fuzzy, proofread) else {
        return -1;
    };
    let b = stats.breakdown();
    *out = TranslateBreakdown {
        proofread: b.proofread,
        translated: b.translated,
        fuzzy: b.fuzzy,
        untranslated: b.untranslated,
    };
    0
}

// ── Utility functions ───────────────────────────────────────────

/// Return the library version string.
///
/// The returned pointer is valid for the lifetime of the library (static).
/// Do NOT free this pointer.
#[unsafe(no_mangle)]
pub extern "C" fn translate_version() -> *const c_char {
    static VERSION: &CStr = c"0.1.0";
    VERSION.as_ptr()
}

/// Free a heap-allocated C string returned by translate functions.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn translate_free_str(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ── Internal helpers ────────────────────────────────────────────

fn cstr_to_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

/// Like `cstr_to_str`, but NULL reads as "".
fn cstr_or_empty<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() { Some("") } else { cstr_to_str(s) }
}

fn str_to_c(s: &str) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

fn set_error(out: *mut *mut c_char, msg: &str) {
    if !out.is_null() {
        unsafe {
            *out = str_to_c(msg);
        }
    }
}
