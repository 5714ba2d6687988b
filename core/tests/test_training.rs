//! End-to-end training: fit/predict round trips, determinism across fresh
//! models, the text-format path, and the error taxonomy.

use proximal_core::data::{read_sparse_text, SparseRows};
use proximal_core::model::{FtrlConfig, FtrlModel, FtrlState, ModelError};
use proximal_core::predict::predict_one;

/// Feature 1 marks positives, feature 2 marks negatives, 0 and 3 are noise.
fn toy_dataset() -> (SparseRows, Vec<f64>) {
    let rows: Vec<Vec<u32>> = vec![
        vec![0, 1],
        vec![0, 2],
        vec![1, 3],
        vec![2, 3],
        vec![0, 1, 3],
        vec![0, 2, 3],
        vec![1],
        vec![2],
    ];
    let y = vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0];
    (SparseRows::from_rows(&rows), y)
}

#[test]
fn test_fit_deterministic_across_fresh_models() {
    let cfg = FtrlConfig { n: 64, l1: 0.1, l2: 0.1, alpha: 0.1, epoch: 3, ..Default::default() };
    let (x, y) = toy_dataset();

    let mut a = FtrlModel::new(cfg.clone()).unwrap();
    let mut b = FtrlModel::new(cfg).unwrap();
    let la = a.fit(&x, &y).unwrap();
    let lb = b.fit(&x, &y).unwrap();

    assert_eq!(la, lb);
    assert_eq!(a.predict(&x).unwrap(), b.predict(&x).unwrap());
}

#[test]
fn test_fit_learns_the_toy_signal() {
    let cfg = FtrlConfig {
        n: 64,
        l1: 0.01,
        l2: 0.01,
        alpha: 0.5,
        epoch: 20,
        interaction: true,
        ..Default::default()
    };
    let (x, y) = toy_dataset();
    let mut model = FtrlModel::new(cfg).unwrap();
    let losses = model.fit(&x, &y).unwrap();

    assert_eq!(losses.len(), 20);
    assert!(
        losses[19] < losses[0],
        "online loss should drop across epochs: first {} last {}",
        losses[0],
        losses[19]
    );

    // Row [1] is positive evidence, row [2] negative.
    let p = model.predict(&x).unwrap();
    assert!(p[6] > 0.5, "positive-only row scored {}", p[6]);
    assert!(p[7] < 0.5, "negative-only row scored {}", p[7]);
}

#[test]
fn test_batch_predict_is_repeatable_and_aligned() {
    let cfg = FtrlConfig { n: 64, epoch: 2, ..Default::default() };
    let (x, y) = toy_dataset();
    let mut model = FtrlModel::new(cfg).unwrap();
    model.fit(&x, &y).unwrap();

    let p1 = model.predict(&x).unwrap();
    let p2 = model.predict(&x).unwrap();
    assert_eq!(p1.len(), x.rows());
    assert_eq!(p1, p2);

    // Batch prediction matches per-row prediction in row order.
    for (r, xi) in x.iter().enumerate() {
        assert_eq!(model.predict_one(xi).unwrap(), p1[r]);
    }
}

#[test]
fn test_text_format_feeds_training() {
    let text = "1 5:1 9:2.5\n0 6:1\n1 5:1 6:1\n";
    let (x, y) = read_sparse_text(text.as_bytes()).unwrap();
    assert_eq!(x.rows(), 3);
    assert_eq!(x.row(0), &[5, 9]);
    assert_eq!(y, vec![1.0, 0.0, 1.0]);

    let mut model = FtrlModel::new(FtrlConfig { n: 32, ..Default::default() }).unwrap();
    let losses = model.fit(&x, &y).unwrap();
    assert_eq!(losses.len(), 1);
    assert!(losses[0].is_finite());
}

#[test]
fn test_dimension_mismatch_is_fatal_up_front() {
    let cfg = FtrlConfig { n: 64, ..Default::default() };
    let (x, mut y) = toy_dataset();
    y.pop();

    let mut model = FtrlModel::new(cfg).unwrap();
    let err = model.fit(&x, &y).unwrap_err();
    assert_eq!(err, ModelError::DimensionMismatch { rows: 8, targets: 7 });
    // Nothing ran: state untouched.
    assert!(model.state.u.iter().all(|&u| u == 0.0));
}

#[test]
fn test_slot_guard_reports_indexer_defects() {
    // The public constructor always sizes state to n + 1; an undersized
    // state is the defect the guard exists to catch.
    let cfg = FtrlConfig { n: 16, ..FtrlConfig::default() };
    let mut state = FtrlState::new(8);
    let err = predict_one(&cfg, &mut state, &[5]).unwrap_err();
    assert_eq!(err, ModelError::SlotOutOfRange { slot: 16, limit: 9 });
}
