//! Domain types for bond yield analytics.
//!
//! - [`Period`]: A coupon interval or tenor in weeks, months or years
//! - [`PeriodUnit`]: The unit a period is measured in
//! - [`CashFlowSequence`]: Ordered cash flows of a bullet bond

mod cashflow;
mod period;

pub use cashflow::CashFlowSequence;
pub use period::{Period, PeriodUnit, MONTHS_PER_YEAR, WEEKS_PER_YEAR};
