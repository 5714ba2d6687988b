/// The FTRL-Proximal accumulator update with exponential time decay.
///
/// Contract: `update_one(x, e)` must be preceded by `predict_one` on the
/// identical x, with no intervening prediction touching the same slots —
/// `h` consumes the `w` values that prediction materialized. The training
/// driver enforces the pairing; direct callers carry the same discipline.

use crate::indexer::compute_indices;
use crate::model::{FtrlConfig, FtrlState, ModelError};

/// Fold one residual error into the accumulators of every touched slot.
pub fn update_one(
    config: &FtrlConfig,
    state: &mut FtrlState,
    x: &[u32],
    e: f64,
) -> Result<(), ModelError> {
    let indices = compute_indices(x, config.n, config.interaction);
    let limit = state.slots();
    let e2 = e * e;
    let decay = (-config.gamma).exp();

    for &i in &indices {
        if i >= limit {
            return Err(ModelError::SlotOutOfRange { slot: i, limit });
        }
        let s = ((state.u[i] + e2).sqrt() - state.u[i].sqrt()) / config.alpha;
        state.u[i] += e2;
        state.d[i] = decay * (state.d[i] + s);
        state.v[i] += e;
        // Reads the w materialized by the paired prediction on this example.
        state.h[i] = decay * (state.h[i] + s * state.w[i]);
        state.z[i] = state.v[i] - state.h[i];
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulators_after_one_update() {
        let cfg = FtrlConfig::test_config();
        let mut state = FtrlState::new(cfg.n);
        update_one(&cfg, &mut state, &[5], 0.5).unwrap();

        let decay = (-cfg.gamma).exp();
        for &i in &[16usize, 5] {
            assert_eq!(state.u[i], 0.25);
            assert_eq!(state.d[i], decay * 50.0);
            assert_eq!(state.v[i], 0.5);
            assert_eq!(state.h[i], 0.0);
            assert_eq!(state.z[i], 0.5);
        }
        // Untouched slots stay zero.
        assert_eq!(state.u[6], 0.0);
        assert_eq!(state.z[6], 0.0);
    }

    #[test]
    fn test_update_consumes_materialized_weight() {
        let cfg = FtrlConfig::test_config();
        let mut state = FtrlState::new(cfg.n);
        state.w[5] = -0.25;
        state.w[16] = 0.0;
        update_one(&cfg, &mut state, &[5], 0.5).unwrap();

        let decay = (-cfg.gamma).exp();
        // s = 50 for a fresh slot; h = decay * s * w.
        assert_eq!(state.h[5], decay * 50.0 * -0.25);
        assert_eq!(state.z[5], 0.5 - state.h[5]);
        assert_eq!(state.h[16], 0.0);
    }

    #[test]
    fn test_slot_guard() {
        let cfg = FtrlConfig::test_config();
        let mut undersized = FtrlState::new(8);
        let err = update_one(&cfg, &mut undersized, &[5], 0.1).unwrap_err();
        assert_eq!(err, ModelError::SlotOutOfRange { slot: 16, limit: 9 });
    }
}
