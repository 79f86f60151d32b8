//! C ABI for the entry-point detector
//!
//! Strings cross the boundary as NUL-terminated buffers. Results returned by
//! [`analyze_code`] are owned by this library and must be released with
//! [`analyze_code_free`]. No panic escapes an exported function.

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::panic;
use std::ptr;

use super::{analyze, contains_main as source_contains_main, Analysis};

/// Analyse NUL-terminated source text and return the JSON encoding of an
/// [`Analysis`].
///
/// # Safety
///
/// `code` must be null or point to a NUL-terminated buffer that stays valid
/// for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn analyze_code(code: *const c_char) -> *mut c_char {
    let analysis = panic::catch_unwind(|| {
        if code.is_null() {
            return Analysis::failed("no source text supplied");
        }
        // SAFETY: non-null and NUL-terminated per the contract above.
        let source = unsafe { CStr::from_ptr(code) }.to_string_lossy();
        analyze(&source)
    })
    .unwrap_or_else(|_| Analysis::failed("analysis aborted"));

    // serde_json escapes control characters, so the encoding has no NUL.
    CString::new(analysis.to_json())
        .map(CString::into_raw)
        .unwrap_or(ptr::null_mut())
}

/// Release a buffer returned by [`analyze_code`].
///
/// # Safety
///
/// `result` must be null or a pointer obtained from [`analyze_code`] that
/// has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn analyze_code_free(result: *mut c_char) {
    if !result.is_null() {
        // SAFETY: allocated by CString::into_raw in analyze_code.
        drop(unsafe { CString::from_raw(result) });
    }
}

/// Returns `0` when the text contains `main(` and `1` otherwise.
///
/// # Safety
///
/// Same contract as [`analyze_code`].
#[no_mangle]
pub unsafe extern "C" fn contains_main(code: *const c_char) -> c_int {
    let found = panic::catch_unwind(|| {
        if code.is_null() {
            return false;
        }
        // SAFETY: non-null and NUL-terminated per the contract above.
        let source = unsafe { CStr::from_ptr(code) }.to_string_lossy();
        source_contains_main(&source)
    })
    .unwrap_or(false);

    if found {
        0
    } else {
        1
    }
}
