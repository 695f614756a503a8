// FFI functions are inherently unsafe: callers must ensure pointer validity.
// Safety contracts are documented per-function in the public API comments.
#![allow(clippy::missing_safety_doc)]

// morphspell-ffi: C-compatible FFI layer for MorphspellHandle.
//
// Memory management rules:
// - Opaque `MorphspellHandle` pointer: created by `morphspell_new` or
//   `morphspell_new_from_bytes`, freed by `morphspell_free`.
// - Returned strings: caller must free with `morphspell_free_str`.
// - Returned string arrays: NULL-terminated, caller must free with
//   `morphspell_free_str_array`.
// - All input strings are UTF-8 encoded, null-terminated C strings.
//
// Overlay functions return the status codes 0 (ok), 1 (already present),
// 2 (example not found), 3 (not found), or -1 on a NULL / non-UTF-8
// argument.

use std::ffi::{CStr, CString, c_char, c_int};
use std::ptr;
use std::slice;

use morphspell::MorphspellHandle;
use morphspell_core::enums::OverlayStatus;

// ── Handle lifecycle ─────────────────────────────────────────────

/// Load a dictionary from a `.dic` and an `.aff` file.
///
/// Returns an opaque pointer on success, NULL on failure.
/// On failure, if `error_out` is non-NULL, it receives a heap-allocated error string
/// that the caller must free with `morphspell_free_str`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn morphspell_new(
    dic_path: *const c_char,
    aff_path: *const c_char,
    error_out: *mut *mut c_char,
) -> *mut MorphspellHandle {
    let (Some(dic_path), Some(aff_path)) = (cstr_to_str(dic_path), cstr_to_str(aff_path)) else {
        set_error(error_out, "dictionary path is null or not UTF-8");
        return ptr::null_mut();
    };
    into_raw_handle(MorphspellHandle::from_files(dic_path, aff_path), error_out)
}

/// Load a dictionary from the raw bytes of its `.dic` and `.aff` files.
///
/// The affix data may be empty (no rules); the dictionary data may not.
/// Error reporting is the same as for `morphspell_new`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn morphspell_new_from_bytes(
    dic_data: *const u8,
    dic_len: usize,
    aff_data: *const u8,
    aff_len: usize,
    error_out: *mut *mut c_char,
) -> *mut MorphspellHandle {
    if dic_data.is_null() || dic_len == 0 {
        set_error(error_out, "dic_data is null or empty");
        return ptr::null_mut();
    }
    let dic = unsafe { slice::from_raw_parts(dic_data, dic_len) };
    let aff: &[u8] = if aff_data.is_null() || aff_len == 0 {
        &[]
    } else {
        unsafe { slice::from_raw_parts(aff_data, aff_len) }
    };
    into_raw_handle(MorphspellHandle::from_bytes(dic, aff), error_out)
}

/// Free a MorphspellHandle created by `morphspell_new` or `morphspell_new_from_bytes`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn morphspell_free(handle: *mut MorphspellHandle) {
    if !handle.is_null() {
        drop(unsafe { Box::from_raw(handle) });
    }
}

/// Encoding label declared by the affix file.
///
/// Returns a heap-allocated C string. Caller must free with `morphspell_free_str`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn morphspell_dictionary_encoding(
    handle: *const MorphspellHandle,
) -> *mut c_char {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        return ptr::null_mut();
    };
    str_to_c(handle.dictionary_encoding())
}

/// Messages for the dictionary lines skipped during loading.
///
/// Returns a NULL-terminated array. Caller must free with `morphspell_free_str_array`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn morphspell_load_warnings(
    handle: *const MorphspellHandle,
) -> *mut *mut c_char {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        return ptr::null_mut();
    };
    let messages: Vec<String> = handle.load_warnings().iter().map(|w| w.to_string()).collect();
    strings_to_c_array(&messages)
}

// ── Queries ─────────────────────────────────────────────────────

/// Check whether a word is correctly spelled.
/// Returns 1 for correct, 0 for incorrect, -1 on error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn morphspell_spell(
    handle: *const MorphspellHandle,
    word: *const c_char,
) -> c_int {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        return -1;
    };
    let Some(word) = cstr_to_str(word) else {
        return -1;
    };
    if handle.spell(word) { 1 } else { 0 }
}

/// Generate spelling suggestions, best first.
///
/// Returns a NULL-terminated array of C strings. Caller must free with
/// `morphspell_free_str_array`. Returns NULL on error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn morphspell_suggest(
    handle: *const MorphspellHandle,
    word: *const c_char,
) -> *mut *mut c_char {
    query_list(handle, word, MorphspellHandle::suggest)
}

/// Morphological descriptions of a word (`st:walk po:verb sfx:V is:past`).
///
/// Returns a NULL-terminated array. Caller must free with `morphspell_free_str_array`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn morphspell_analyze(
    handle: *const MorphspellHandle,
    word: *const c_char,
) -> *mut *mut c_char {
    query_list(handle, word, MorphspellHandle::analyze)
}

/// Stems of a word.
///
/// Returns a NULL-terminated array. Caller must free with `morphspell_free_str_array`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn morphspell_stem(
    handle: *const MorphspellHandle,
    word: *const c_char,
) -> *mut *mut c_char {
    query_list(handle, word, MorphspellHandle::stem)
}

/// Forms of `word` inflected like `example`.
///
/// Returns a NULL-terminated array. Caller must free with `morphspell_free_str_array`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn morphspell_generate(
    handle: *const MorphspellHandle,
    word: *const c_char,
    example: *const c_char,
) -> *mut *mut c_char {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        return ptr::null_mut();
    };
    let (Some(word), Some(example)) = (cstr_to_str(word), cstr_to_str(example)) else {
        return ptr::null_mut();
    };
    strings_to_c_array(&handle.generate(word, example))
}

// ── Runtime dictionary ──────────────────────────────────────────

/// Accept a word for the rest of the session. Returns an overlay status code.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn morphspell_add(
    handle: *const MorphspellHandle,
    word: *const c_char,
) -> c_int {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        return -1;
    };
    let Some(word) = cstr_to_str(word) else {
        return -1;
    };
    status_code(handle.add(word))
}

/// Add a word that inflects like `example`. Returns an overlay status code.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn morphspell_add_with_affix(
    handle: *const MorphspellHandle,
    word: *const c_char,
    example: *const c_char,
) -> c_int {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        return -1;
    };
    let (Some(word), Some(example)) = (cstr_to_str(word), cstr_to_str(example)) else {
        return -1;
    };
    status_code(handle.add_with_affix(word, example))
}

/// Stop accepting a word for the rest of the session. Returns an overlay
/// status code.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn morphspell_remove(
    handle: *const MorphspellHandle,
    word: *const c_char,
) -> c_int {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        return -1;
    };
    let Some(word) = cstr_to_str(word) else {
        return -1;
    };
    status_code(handle.remove(word))
}

// ── Option setters ──────────────────────────────────────────────

macro_rules! count_setter {
    ($name:ident, $method:ident) => {
        /// Negative values are treated as 0.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $name(handle: *mut MorphspellHandle, value: c_int) {
            if let Some(handle) = unsafe { handle.as_mut() } {
                handle.$method(value.max(0) as usize);
            }
        }
    };
}

count_setter!(morphspell_set_max_suggestions, set_max_suggestions);
count_setter!(morphspell_set_max_suggestion_cost, set_max_suggestion_cost);
count_setter!(morphspell_set_speller_cache_size, set_speller_cache_size);

// ── Utility functions ───────────────────────────────────────────

/// Return the library version string.
///
/// The returned pointer is valid for the lifetime of the library (static).
/// Do NOT free this pointer.
#[unsafe(no_mangle)]
pub extern "C" fn morphspell_version() -> *const c_char {
    static VERSION: std::sync::LazyLock<CString> = std::sync::LazyLock::new(|| {
        CString::new(MorphspellHandle::get_version()).unwrap_or_default()
    });
    VERSION.as_ptr()
}

/// Free a heap-allocated C string returned by morphspell functions.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn morphspell_free_str(s: *mut c_char) {
    free_c_str(s);
}

/// Free a NULL-terminated array of C strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn morphspell_free_str_array(arr: *mut *mut c_char) {
    free_null_terminated_array(arr);
}

// ── Internal helpers ────────────────────────────────────────────

fn into_raw_handle<E: std::fmt::Display>(
    result: Result<MorphspellHandle, E>,
    error_out: *mut *mut c_char,
) -> *mut MorphspellHandle {
    match result {
        Ok(handle) => Box::into_raw(Box::new(handle)),
        Err(e) => {
            set_error(error_out, &e.to_string());
            ptr::null_mut()
        }
    }
}

fn status_code(status: OverlayStatus) -> c_int {
    status.code()
}

fn query_list(
    handle: *const MorphspellHandle,
    word: *const c_char,
    query: fn(&MorphspellHandle, &str) -> Vec<String>,
) -> *mut *mut c_char {
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        return ptr::null_mut();
    };
    let Some(word) = cstr_to_str(word) else {
        return ptr::null_mut();
    };
    strings_to_c_array(&query(handle, word))
}

fn cstr_to_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
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

fn free_c_str(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// The array is allocated as a boxed slice of exactly `len + 1` pointers.
fn strings_to_c_array(strings: &[String]) -> *mut *mut c_char {
    let mut ptrs: Vec<*mut c_char> = strings.iter().map(|s| str_to_c(s)).collect();
    ptrs.push(ptr::null_mut()); // NULL terminator
    Box::into_raw(ptrs.into_boxed_slice()) as *mut *mut c_char
}

fn free_null_terminated_array(arr: *mut *mut c_char) {
    if arr.is_null() {
        return;
    }
    let mut i = 0;
    loop {
        let p = unsafe { *arr.add(i) };
        if p.is_null() {
            break;
        }
        free_c_str(p);
        i += 1;
    }
    drop(unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(arr, i + 1)) });
}
