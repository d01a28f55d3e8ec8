//! PyO3 bindings for Python integration

use pyo3::prelude::*;

mod spectrum_bindings;

/// Python module definition
#[pymodule]
fn spectral_frame(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<spectrum_bindings::PySpectralAnalyzer>()?;
    m.add_class::<spectrum_bindings::PyWindowType>()?;

    Ok(())
}
