//! # Bondyield
//!
//! Yield and pricing metrics for fixed coupon bullet bonds.
//!
//! This crate re-exports the public API of the Bondyield workspace:
//!
//! - [`bondyield_core`]: [`Period`] and [`CashFlowSequence`]
//! - [`bondyield_math`]: Newton-Raphson, bisection and hybrid root finders
//! - [`bondyield_bonds`]: cash flow generation, yield to maturity, realized compounded
//!   yield, pricing from a yield and DV01
//!
//! ## Example
//!
//! ```rust
//! use bondyield::prelude::*;
//!
//! let bond = Bond::new(900.0, 1000.0, 5.0, Period::Years(1), Period::Years(5))?;
//!
//! let metrics = bond.metrics(4.0)?;
//! assert!((metrics.ytm - 7.4697).abs() < 1e-4);
//! assert!(metrics.rcy < metrics.ytm);
//! assert!(metrics.dv01 > bond.market_price());
//! # Ok::<(), BondError>(())
//! ```

#![warn(missing_docs)]

pub use bondyield_bonds;
pub use bondyield_core;
pub use bondyield_math;

pub use bondyield_bonds::{
    Bond, BondBuilder, BondError, BondMetrics, BondResult, PricingEngine, YieldSolver,
};
pub use bondyield_core::{CashFlowSequence, CoreError, CoreResult, Period, PeriodUnit};
pub use bondyield_math::solvers::SolverConfig;
pub use bondyield_math::{MathError, MathResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use bondyield_bonds::prelude::*;
    pub use bondyield_core::prelude::*;
    pub use bondyield_math::solvers::{SolverConfig, SolverMethod};
}
