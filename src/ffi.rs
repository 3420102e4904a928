//! FFI bindings for heartcheck
//!
//! This module provides C-compatible functions so a presentation layer written in
//! another language can drive the predictor. All functions use C strings
//! (null-terminated) and return allocated memory that must be freed by the
//! caller using `heartcheck_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::artifacts::ArtifactSet;
use crate::config::PredictorConfig;
use crate::error::PredictError;
use crate::pipeline::HeartRiskPredictor;
use crate::types::RawInput;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Report a result through the last-error slot, returning a C string or NULL
fn finish(result: Result<String, PredictError>) -> *mut c_char {
    match result {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

fn into_handle(result: Result<HeartRiskPredictor, PredictError>) -> *mut HeartPredictorHandle {
    match result {
        Ok(predictor) => Box::into_raw(Box::new(HeartPredictorHandle { predictor })),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Predictor Lifecycle
// ============================================================================

/// Opaque handle to a HeartRiskPredictor
pub struct HeartPredictorHandle {
    predictor: HeartRiskPredictor,
}

/// Create a predictor from in-memory artifact JSON documents.
///
/// # Safety
/// - `model_json`, `scaler_json` and `columns_json` must be valid null-terminated C strings.
/// - Returns a pointer that must be freed with `heartcheck_predictor_free`.
/// - Returns NULL on error; call `heartcheck_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn heartcheck_predictor_new(
    model_json: *const c_char,
    scaler_json: *const c_char,
    columns_json: *const c_char,
    strict_categories: bool,
) -> *mut HeartPredictorHandle {
    clear_last_error();

    let model = match cstr_to_string(model_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid model JSON string pointer");
            return ptr::null_mut();
        }
    };

    let scaler = match cstr_to_string(scaler_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid scaler JSON string pointer");
            return ptr::null_mut();
        }
    };

    let columns = match cstr_to_string(columns_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid columns JSON string pointer");
            return ptr::null_mut();
        }
    };

    into_handle(
        ArtifactSet::from_json(&model, &scaler, &columns)
            .and_then(|set| HeartRiskPredictor::new(set, strict_categories)),
    )
}

/// Create a predictor from the default artifact files inside a directory.
///
/// # Safety
/// - `artifact_dir` must be a valid null-terminated C string.
/// - Returns a pointer that must be freed with `heartcheck_predictor_free`.
/// - Returns NULL on error; call `heartcheck_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn heartcheck_predictor_open(
    artifact_dir: *const c_char,
    strict_categories: bool,
) -> *mut HeartPredictorHandle {
    clear_last_error();

    let dir = match cstr_to_string(artifact_dir) {
        Some(s) => s,
        None => {
            set_last_error("Invalid artifact directory string pointer");
            return ptr::null_mut();
        }
    };

    let config = PredictorConfig::from_dir(dir).with_strict_categories(strict_categories);
    into_handle(HeartRiskPredictor::load(&config))
}

/// Free a predictor.
///
/// # Safety
/// - `predictor` must be a valid pointer returned by `heartcheck_predictor_new`
///   or `heartcheck_predictor_open`, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn heartcheck_predictor_free(predictor: *mut HeartPredictorHandle) {
    if !predictor.is_null() {
        drop(Box::from_raw(predictor));
    }
}

// ============================================================================
// Prediction API
// ============================================================================

/// Predict from a raw input JSON object and return the report JSON.
///
/// # Safety
/// - `predictor` must be a valid pointer returned by a constructor above.
/// - `raw_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `heartcheck_free_string`.
/// - Returns NULL on error; call `heartcheck_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn heartcheck_predict(
    predictor: *const HeartPredictorHandle,
    raw_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if predictor.is_null() {
        set_last_error("Null predictor pointer");
        return ptr::null_mut();
    }

    let handle = &*predictor;

    let json_str = match cstr_to_string(raw_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    finish(handle.predictor.predict_json(&json_str))
}

/// Align a raw input JSON object and return the feature vector as a JSON array.
///
/// # Safety
/// - `predictor` must be a valid pointer returned by a constructor above.
/// - `raw_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `heartcheck_free_string`.
/// - Returns NULL on error; call `heartcheck_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn heartcheck_align(
    predictor: *const HeartPredictorHandle,
    raw_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if predictor.is_null() {
        set_last_error("Null predictor pointer");
        return ptr::null_mut();
    }

    let handle = &*predictor;

    let json_str = match cstr_to_string(raw_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    let result = serde_json::from_str::<RawInput>(&json_str)
        .map_err(|e| PredictError::ParseError(e.to_string()))
        .and_then(|raw| handle.predictor.align(&raw))
        .and_then(|aligned| serde_json::to_string(&aligned.vector).map_err(PredictError::from));

    finish(result)
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by heartcheck functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a heartcheck function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn heartcheck_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next heartcheck call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn heartcheck_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the heartcheck library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn heartcheck_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
