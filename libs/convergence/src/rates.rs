use nalgebra::DVector;

/// Observed convergence orders between consecutive refinements
///
/// `order[i] = ln(e[i] / e[i+1]) / ln(s[i] / s[i+1])`
///
/// An entry is `None` when it is undefined: non-positive values, or two refinements with the same size.
pub fn observed_orders(errors: &DVector<f64>, sizes: &DVector<f64>) -> Vec<Option<f64>> {
    let n = errors.len().min(sizes.len());

    (1..n)
        .map(|i| {
            let [e0, e1] = [errors[i - 1], errors[i]];
            let [s0, s1] = [sizes[i - 1], sizes[i]];

            if e0 <= 0.0 || e1 <= 0.0 || s0 <= 0.0 || s1 <= 0.0 || s0 == s1 {
                None
            } else {
                Some((e0 / e1).ln() / (s0 / s1).ln())
            }
        })
        .collect()
}
