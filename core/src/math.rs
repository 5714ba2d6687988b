/// Scalar numeric primitives shared by the learner.
///
/// All free functions on f64. The sigmoid clamp is a fixed constant:
/// two ports of this learner only reproduce each other's predictions if
/// they saturate at the same bound.

/// Input clamp for the sigmoid exponential.
pub const SIGMOID_CLAMP: f64 = 35.0;

/// Logistic squashing: 1 / (1 + exp(-x)), overflow-safe.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    let x = x.max(-SIGMOID_CLAMP).min(SIGMOID_CLAMP);
    1.0 / (1.0 + (-x).exp())
}

/// Logistic loss of a single prediction against a {0, 1} target.
/// The probability is floored away from the endpoints so the log is finite.
#[inline]
pub fn log_loss(p: f64, y: f64) -> f64 {
    let p = p.max(1e-15).min(1.0 - 1e-15);
    if y > 0.0 {
        -p.ln()
    } else {
        -(1.0 - p).ln()
    }
}
