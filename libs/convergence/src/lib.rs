/// Observed convergence orders between consecutive refinements
pub mod rates;
/// The error quantities that can be compared against their nominal convergence orders
pub mod quantity;
/// Power-law reference curves anchored at the finest refinement
pub mod reference;

pub use quantity::{ExpectedOrders, OrderOffset, Quantity, QUANTITIES};
pub use rates::observed_orders;
pub use reference::{ComparisonError, ReferenceCurves};
