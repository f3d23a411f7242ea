use super::quantity::{ExpectedOrders, Quantity};

use dumps::ConvergenceTable;
use nalgebra::DVector;
use thiserror::Error;

/// Errors that may occur when building reference curves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComparisonError {
    #[error("no refinement tests to compare")]
    Empty,

    #[error("the report has no `{key}` entries")]
    MissingQuantity { key: &'static str },

    #[error("{name} has {found} entries, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    /// The finest discretization is used as the anchor and must have a nonzero size.
    #[error("the finest {name} is zero; cannot anchor reference curves")]
    ZeroFinestSize { name: &'static str },
}

/// Power-law curves through the finest (last) error value.
///
/// * `space[i] = (h[i] / h[n-1])^op * e[n-1]`
/// * `time[i] = (tau[i] / tau[n-1])^oq * e[n-1]`
/// * `combined[i] = ((h[i] / h[n-1])^op + (tau[i] / tau[n-1])^oq) * e[n-1] / 2`
///
/// All curves coincide with the error series at the last index, so rates can be compared visually without a fit.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCurves {
    pub space: DVector<f64>,
    pub time: DVector<f64>,
    pub combined: Option<DVector<f64>>,
}

impl ReferenceCurves {
    /// Reference curves for `errors` with the given expected orders
    ///
    /// * `with_combined`: whether the additive space-time curve should be produced
    pub fn anchored(
        errors: &DVector<f64>,
        h: &DVector<f64>,
        tau: &DVector<f64>,
        orders: ExpectedOrders,
        with_combined: bool,
    ) -> Result<Self, ComparisonError> {
        let n = errors.len();
        if n == 0 {
            return Err(ComparisonError::Empty);
        }
        check_length("h", n, h.len())?;
        check_length("tau", n, tau.len())?;

        let anchor = errors[n - 1];
        let space_terms = power_terms("h", h, orders.space)?;
        let time_terms = power_terms("tau", tau, orders.time)?;

        let combined = if with_combined {
            Some((&space_terms + &time_terms) * anchor / 2.0)
        } else {
            None
        };

        Ok(Self {
            space: space_terms * anchor,
            time: time_terms * anchor,
            combined,
        })
    }

    /// Reference curves of a quantity of an error report
    pub fn for_quantity(
        table: &ConvergenceTable,
        quantity: &Quantity,
    ) -> Result<Self, ComparisonError> {
        let errors = table
            .error(quantity.norm)
            .ok_or(ComparisonError::MissingQuantity {
                key: quantity.norm.key(),
            })?;
        let nominal = table.nominal_orders();

        Self::anchored(
            errors,
            table.h(),
            table.tau(),
            quantity.expected_orders(nominal),
            quantity.includes_combined(nominal),
        )
    }
}

fn check_length(name: &'static str, expected: usize, found: usize) -> Result<(), ComparisonError> {
    if expected == found {
        Ok(())
    } else {
        Err(ComparisonError::LengthMismatch {
            name,
            expected,
            found,
        })
    }
}

/// `(sizes[i] / sizes[n-1])^order`
fn power_terms(
    name: &'static str,
    sizes: &DVector<f64>,
    order: i32,
) -> Result<DVector<f64>, ComparisonError> {
    let finest = sizes[sizes.len() - 1];
    if finest == 0.0 {
        return Err(ComparisonError::ZeroFinestSize { name });
    }

    Ok(sizes.map(|size| (size / finest).powi(order)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dumps::{Dump, NominalOrders};
    use proptest::prelude::*;

    fn halving(n: usize, start: f64) -> DVector<f64> {
        DVector::from_iterator(n, (0..n).map(|i| start / 2f64.powi(i as i32)))
    }

    #[test]
    fn second_order_curves() {
        let errors = DVector::from_vec(vec![0.04, 0.01, 0.0025]);
        let h = halving(3, 0.5);
        let tau = halving(3, 0.25);

        let curves = ReferenceCurves::anchored(
            &errors,
            &h,
            &tau,
            ExpectedOrders { space: 2, time: 2 },
            true,
        )
        .unwrap();

        assert_relative_eq!(curves.space, errors);
        assert_relative_eq!(curves.time, errors);
        assert_relative_eq!(curves.combined.unwrap(), errors);
    }

    #[test]
    fn mixed_orders() {
        let errors = DVector::from_vec(vec![1.0, 1.0]);
        let h = DVector::from_vec(vec![0.2, 0.1]);
        let tau = DVector::from_vec(vec![0.75, 0.25]);

        let curves = ReferenceCurves::anchored(
            &errors,
            &h,
            &tau,
            ExpectedOrders { space: 3, time: 1 },
            true,
        )
        .unwrap();

        assert_relative_eq!(curves.space[0], 8.0);
        assert_relative_eq!(curves.time[0], 3.0);
        assert_relative_eq!(curves.combined.unwrap()[0], 5.5);
    }

    #[test]
    fn single_test_is_trivially_anchored() {
        let table = ConvergenceTable::parse("DoFs: 10\np: 1\nq: 1\nh: 0.5\nt: 0.5\nl2l2: 0.01\n").unwrap();
        let curves = ReferenceCurves::for_quantity(&table, Quantity::by_name("l2l2").unwrap()).unwrap();

        assert_eq!(curves.space.as_slice(), &[0.01]);
        assert_eq!(curves.time.as_slice(), &[0.01]);
        assert_eq!(curves.combined.unwrap().as_slice(), &[0.01]);
    }

    #[test]
    fn combined_withheld_for_unbalanced_degrees() {
        let table = ConvergenceTable::parse(
            "DoFs: 10\np: 2\nq: 1\nh: 0.5\nt: 0.5\nl2h1: 0.1\nDoFs: 40\np: 2\nq: 1\nh: 0.25\nt: 0.25\nl2h1: 0.025\n",
        )
        .unwrap();
        assert_eq!(table.nominal_orders(), NominalOrders { p: 2, q: 1 });

        let curves = ReferenceCurves::for_quantity(&table, Quantity::by_name("l2h1").unwrap()).unwrap();
        assert!(curves.combined.is_none());
        assert_relative_eq!(curves.space[0], 0.1);
        assert_relative_eq!(curves.time[0], 0.05);
    }

    #[test]
    fn missing_quantity() {
        let table = ConvergenceTable::parse("DoFs: 10\np: 1\nq: 1\nh: 0.5\nt: 0.5\n").unwrap();

        assert_eq!(
            ReferenceCurves::for_quantity(&table, Quantity::by_name("linfl2").unwrap()),
            Err(ComparisonError::MissingQuantity { key: "linfl2" })
        );
    }

    #[test]
    fn zero_finest_size_is_rejected() {
        let errors = DVector::from_vec(vec![0.1, 0.01]);
        let h = DVector::from_vec(vec![0.5, 0.0]);
        let tau = DVector::from_vec(vec![0.5, 0.25]);

        assert_eq!(
            ReferenceCurves::anchored(&errors, &h, &tau, ExpectedOrders { space: 2, time: 2 }, false),
            Err(ComparisonError::ZeroFinestSize { name: "h" })
        );
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let errors = DVector::from_vec(vec![0.1, 0.01]);
        let h = DVector::from_vec(vec![0.5]);

        assert!(matches!(
            ReferenceCurves::anchored(&errors, &h, &h, ExpectedOrders { space: 1, time: 1 }, false),
            Err(ComparisonError::LengthMismatch { name: "h", .. })
        ));
        assert_eq!(
            ReferenceCurves::anchored(
                &DVector::from_vec(vec![]),
                &h,
                &h,
                ExpectedOrders { space: 1, time: 1 },
                false
            ),
            Err(ComparisonError::Empty)
        );
    }

    proptest! {
        #[test]
        fn curves_meet_the_finest_error(
            rows in prop::collection::vec((1e-8f64..1.0, 1e-3f64..10.0, 1e-3f64..10.0), 1..12),
            space in 0i32..6,
            time in 0i32..6,
        ) {
            let n = rows.len();
            let errors = DVector::from_iterator(n, rows.iter().map(|r| r.0));
            let h = DVector::from_iterator(n, rows.iter().map(|r| r.1));
            let tau = DVector::from_iterator(n, rows.iter().map(|r| r.2));

            let curves = ReferenceCurves::anchored(&errors, &h, &tau, ExpectedOrders { space, time }, true).unwrap();

            prop_assert_eq!(curves.space[n - 1], errors[n - 1]);
            prop_assert_eq!(curves.time[n - 1], errors[n - 1]);
            prop_assert_eq!(curves.combined.unwrap()[n - 1], errors[n - 1]);
        }

        #[test]
        fn refining_h_never_raises_the_space_curve(
            sizes in prop::collection::btree_set(1u32..100_000, 2..10),
            error in 1e-8f64..1.0,
            p in 0i32..5,
        ) {
            let h: Vec<f64> = sizes.into_iter().rev().map(|s| s as f64 * 1e-5).collect();
            let n = h.len();
            let h = DVector::from_vec(h);
            let errors = DVector::from_element(n, error);

            let curves = ReferenceCurves::anchored(&errors, &h, &h, ExpectedOrders { space: p, time: p }, false).unwrap();

            for i in 1..n {
                prop_assert!(curves.space[i] <= curves.space[i - 1]);
            }
        }
    }
}
