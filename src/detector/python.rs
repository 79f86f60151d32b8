//! Python bindings for the entry-point detector.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::{analyze, contains_main};

/// Analyse source text.
///
/// Returns:
///     dict: {"success": bool, "hasMain": bool, "message": str}
#[pyfunction]
#[pyo3(name = "analyze_code")]
fn py_analyze_code(py: Python<'_>, code: &str) -> PyResult<PyObject> {
    let analysis = analyze(code);
    let dict = PyDict::new(py);
    dict.set_item("success", analysis.success)?;
    dict.set_item("hasMain", analysis.has_main)?;
    dict.set_item("message", analysis.message)?;
    Ok(dict.to_object(py))
}

/// True when the text contains `main(`.
#[pyfunction]
#[pyo3(name = "contains_main")]
fn py_contains_main(code: &str) -> bool {
    contains_main(code)
}

#[pymodule]
fn sandbox_probes(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_analyze_code, m)?)?;
    m.add_function(wrap_pyfunction!(py_contains_main, m)?)?;
    Ok(())
}
