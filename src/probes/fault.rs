//! Fault-injection probe
//!
//! Stores through a pointer into the null page. The MMU raises a real
//! access violation and the process dies by `SIGSEGV`; nothing here
//! catches it, so the signal is the probe's only output after the notice.

use log::debug;
use std::hint::black_box;
use std::io::{self, Write};
use std::ptr;

use crate::verdict::Reporter;

/// Line printed on stderr right before the fault
pub const NOTICE: &str = "About to cause a segmentation fault...";

/// Line that must never appear
pub const SENTINEL: &str = "This line will never be printed.";

pub fn run() {
    Reporter::new(io::stderr()).line(NOTICE);
    // SAFETY: none. Terminating the process here is the point.
    unsafe { trigger() };
    Reporter::new(io::stdout()).line(SENTINEL);
}

/// Address inside the first page, which is never mapped.
///
/// Debug builds reject a literal null before the store is issued, which
/// would abort rather than fault, so the pointer is offset by one element.
pub fn null_page() -> *mut u32 {
    black_box(ptr::null_mut::<u32>()).wrapping_add(1)
}

/// Store through [`null_page`].
///
/// # Safety
///
/// Never sound to call: the store is an invalid memory access and the
/// process is expected to die by `SIGSEGV` before this returns.
pub unsafe fn trigger() {
    let target = null_page();
    debug!("storing through {:p}", target);
    let _ = io::stderr().flush();
    ptr::write_volatile(target, 42);
}
