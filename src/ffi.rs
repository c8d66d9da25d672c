//! C-ABI FFI bindings for cross-language integration.
//!
//! This module provides a C-compatible API for using adfmd from other
//! languages such as C#, Python, and Node.js.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::{Converter, ParseOptions};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct AdfmdResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed). Must be freed with `adfmd_free_string`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Must be freed with `adfmd_free_string`.
    pub error: *mut c_char,
}

impl AdfmdResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }
}

/// Convert a JSON document (or pre-rendered text) to Markdown.
///
/// Conversion itself never fails; only invalid arguments produce an error
/// result.
///
/// # Safety
///
/// The `input` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `adfmd_free_result`.
#[no_mangle]
pub unsafe extern "C" fn adfmd_to_markdown(input: *const c_char) -> AdfmdResult {
    convert(input, Converter::new())
}

/// Convert a JSON document to Markdown, failing on malformed nodes.
///
/// A document with a malformed node or excessive nesting converts to
/// [`crate::CONVERSION_ERROR_SENTINEL`] instead of a partial rendering.
///
/// # Safety
///
/// The `input` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `adfmd_free_result`.
#[no_mangle]
pub unsafe extern "C" fn adfmd_to_markdown_strict(input: *const c_char) -> AdfmdResult {
    convert(input, Converter::new().strict())
}

unsafe fn convert(input: *const c_char, converter: Converter) -> AdfmdResult {
    if input.is_null() {
        return AdfmdResult::error("Input cannot be null".to_string());
    }

    let input_str = match CStr::from_ptr(input).to_str() {
        Ok(s) => s,
        Err(_) => return AdfmdResult::error("Invalid UTF-8 input".to_string()),
    };

    AdfmdResult::success(converter.convert_str(input_str))
}

/// Get node-kind counts of a JSON document as a JSON object.
///
/// # Safety
///
/// The `input` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `adfmd_free_result`.
#[no_mangle]
pub unsafe extern "C" fn adfmd_inspect(input: *const c_char) -> AdfmdResult {
    if input.is_null() {
        return AdfmdResult::error("Input cannot be null".to_string());
    }

    let input_str = match CStr::from_ptr(input).to_str() {
        Ok(s) => s,
        Err(_) => return AdfmdResult::error("Invalid UTF-8 input".to_string()),
    };

    match inspect_internal(input_str) {
        Ok(info) => AdfmdResult::success(info),
        Err(e) => AdfmdResult::error(e.to_string()),
    }
}

fn inspect_internal(input: &str) -> crate::Result<String> {
    let options = ParseOptions::new().lenient();
    let doc = crate::parser::parse_str(input, &options)?.unwrap_or_default();
    let info = serde_json::json!({
        "version": doc.version,
        "node_count": doc.len(),
        "max_depth": doc.max_depth(),
        "skipped": doc.skipped_count(),
        "kinds": doc.kind_counts(),
    });
    Ok(serde_json::to_string_pretty(&info)?)
}

/// Free a result returned by any adfmd function.
///
/// # Safety
///
/// The `result` must have been returned by an adfmd function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn adfmd_free_result(result: AdfmdResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Free a string allocated by adfmd.
///
/// # Safety
///
/// The `ptr` must have been allocated by adfmd.
/// This function should only be called once per pointer.
#[no_mangle]
pub unsafe extern "C" fn adfmd_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the version of the adfmd library.
///
/// The returned string is statically allocated and should not be freed.
#[no_mangle]
pub extern "C" fn adfmd_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
