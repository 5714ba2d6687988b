/// Training driver and batch predictor.
///
/// Strictly sequential: fixed row order, no shuffling, epochs back to back.
/// Each row runs predict → residual → update, so the whole pass is
/// deterministic given the data order and configuration.

use crate::data::SparseRows;
use crate::math::log_loss;
use crate::model::{FtrlConfig, FtrlState, ModelError};
use crate::predict::predict_one;
use crate::update::update_one;

/// One predict/update pass per row, `config.epoch` times over.
///
/// Returns the mean logistic loss of each epoch's pre-update predictions —
/// the online (progressive validation) loss, not a re-scored training loss.
pub fn fit(
    config: &FtrlConfig,
    state: &mut FtrlState,
    x: &SparseRows,
    y: &[f64],
) -> Result<Vec<f64>, ModelError> {
    if x.rows() != y.len() {
        return Err(ModelError::DimensionMismatch { rows: x.rows(), targets: y.len() });
    }

    let mut losses = Vec::with_capacity(config.epoch);
    for _ in 0..config.epoch {
        let mut loss = 0.0;
        for (row, xi) in x.iter().enumerate() {
            let p = predict_one(config, state, xi)?;
            loss += log_loss(p, y[row]);
            update_one(config, state, xi, p - y[row])?;
        }
        losses.push(loss / x.rows().max(1) as f64);
    }
    Ok(losses)
}

/// `predict_one` per row, original order preserved.
///
/// Same weight-materializing side effect as training.
pub fn predict(
    config: &FtrlConfig,
    state: &mut FtrlState,
    x: &SparseRows,
) -> Result<Vec<f64>, ModelError> {
    let mut out = Vec::with_capacity(x.rows());
    for xi in x.iter() {
        out.push(predict_one(config, state, xi)?);
    }
    Ok(out)
}
