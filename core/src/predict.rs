/// Prediction — the lazy proximal weight-materialization step.
///
/// `predict_one` is a side-effecting read: every call overwrites `w` at the
/// touched slots with the closed-form soft-threshold solution before taking
/// the dot product. The paired update consumes exactly those `w` values, so
/// the mutation is part of the contract, not an optimization to purify away.

use crate::indexer::compute_indices;
use crate::math::sigmoid;
use crate::model::{FtrlConfig, FtrlState, ModelError};

/// Squashed score for one example's raw feature indices.
///
/// Slots repeated through hash collisions are processed once per
/// occurrence: each occurrence re-materializes and re-contributes.
pub fn predict_one(
    config: &FtrlConfig,
    state: &mut FtrlState,
    x: &[u32],
) -> Result<f64, ModelError> {
    let indices = compute_indices(x, config.n, config.interaction);
    let limit = state.slots();
    let mut wtx = 0.0;

    for &i in &indices {
        if i >= limit {
            return Err(ModelError::SlotOutOfRange { slot: i, limit });
        }
        // Closed-form proximal step: z inside the L1 ball kills the weight.
        let sign = if state.z[i] < 0.0 { -1.0 } else { 1.0 };
        if sign * state.z[i] <= config.l1 {
            state.w[i] = 0.0;
        } else {
            state.w[i] = (sign * config.l1 - state.z[i]) / (config.l2 + state.d[i]);
        }
        wtx += state.w[i];
    }

    Ok(sigmoid(wtx))
}
