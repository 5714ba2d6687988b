//! PyO3 bindings for the proximal core.
//!
//! Thin wrappers over plain lists — no Python-side math. All computation
//! happens in Rust; errors surface as ValueError.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use proximal_core::data::SparseRows;
use proximal_core::model::{FtrlConfig as RustConfig, FtrlModel as RustModel, ModelError};

fn to_value_err(e: ModelError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

// ── FtrlConfig ───────────────────────────────────────────────────────

#[pyclass(frozen)]
struct FtrlConfig {
    inner: RustConfig,
}

#[pymethods]
impl FtrlConfig {
    #[new]
    #[pyo3(signature = (
        alpha = 0.01,
        gamma = 0.0005,
        l1 = 1.0,
        l2 = 1.0,
        n = 1 << 20,
        epoch = 1,
        interaction = true
    ))]
    fn new(
        alpha: f64,
        gamma: f64,
        l1: f64,
        l2: f64,
        n: usize,
        epoch: usize,
        interaction: bool,
    ) -> PyResult<Self> {
        let inner = RustConfig { alpha, gamma, l1, l2, n, epoch, interaction };
        inner
            .validate()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(FtrlConfig { inner })
    }

    #[getter]
    fn alpha(&self) -> f64 {
        self.inner.alpha
    }
    #[getter]
    fn gamma(&self) -> f64 {
        self.inner.gamma
    }
    #[getter]
    fn l1(&self) -> f64 {
        self.inner.l1
    }
    #[getter]
    fn l2(&self) -> f64 {
        self.inner.l2
    }
    #[getter]
    fn n(&self) -> usize {
        self.inner.n
    }
    #[getter]
    fn epoch(&self) -> usize {
        self.inner.epoch
    }
    #[getter]
    fn interaction(&self) -> bool {
        self.inner.interaction
    }

    fn __repr__(&self) -> String {
        self.inner.to_string()
    }
}

// ── FtrlModel ────────────────────────────────────────────────────────

#[pyclass]
struct FtrlModel {
    inner: RustModel,
}

#[pymethods]
impl FtrlModel {
    #[new]
    fn new(config: &FtrlConfig) -> PyResult<Self> {
        RustModel::new(config.inner.clone())
            .map(|inner| FtrlModel { inner })
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Slot sequence for one example (bias slot first).
    fn indices(&self, x: Vec<u32>) -> Vec<usize> {
        self.inner.indices(&x)
    }

    /// Probability for one example. Materializes weights as a side effect.
    fn predict_one(&mut self, x: Vec<u32>) -> PyResult<f64> {
        self.inner.predict_one(&x).map_err(to_value_err)
    }

    /// Fold one residual error in. Must follow predict_one on the same x.
    fn update_one(&mut self, x: Vec<u32>, e: f64) -> PyResult<()> {
        self.inner.update_one(&x, e).map_err(to_value_err)
    }

    /// Train on rows of raw feature indices. Returns per-epoch mean log loss.
    fn fit(&mut self, x: Vec<Vec<u32>>, y: Vec<f64>) -> PyResult<Vec<f64>> {
        let rows = SparseRows::from_rows(&x);
        self.inner.fit(&rows, &y).map_err(to_value_err)
    }

    /// Probabilities for each row, input order preserved.
    fn predict(&mut self, x: Vec<Vec<u32>>) -> PyResult<Vec<f64>> {
        let rows = SparseRows::from_rows(&x);
        self.inner.predict(&rows).map_err(to_value_err)
    }

    /// Snapshot of the materialized weight array (length n + 1, bias last).
    fn weights(&self) -> Vec<f64> {
        self.inner.state.w.clone()
    }

    fn __repr__(&self) -> String {
        self.inner.config.to_string()
    }
}

#[pymodule]
fn proximal(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<FtrlConfig>()?;
    m.add_class::<FtrlModel>()?;
    Ok(())
}
