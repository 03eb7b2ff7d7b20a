//! # Bondyield Bonds
//!
//! Bond cash flows, yields and pricing for the Bondyield fixed income metrics
//! library.
//!
//! This crate provides:
//!
//! - **Cash Flows**: the discrete coupon and principal sequence of a bullet bond
//! - **Pricing**: yield-to-maturity (IRR) solving and price from a target yield
//! - **Analytics**: realized compounded yield and DV01
//! - **Instruments**: a validated [`Bond`] with named defaults
//!
//! ## Example
//!
//! ```rust
//! use bondyield_bonds::prelude::*;
//! use bondyield_core::types::Period;
//!
//! let bond = Bond::builder()
//!     .market_price(98.336995)
//!     .face_value(100.0)
//!     .coupon_rate_pct(1.75)
//!     .coupon_period(Period::Years(1))
//!     .tenor(Period::Years(20))
//!     .build()?;
//!
//! let ytm = bond.ytm()?;
//! assert!((ytm - 1.850).abs() < 1e-3);
//!
//! // Pricing at the YTM gives back the market price.
//! let price = bond.price_at_yield(ytm)?;
//! assert!((price - 98.336995).abs() < 1e-6);
//! # Ok::<(), BondError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::float_cmp)]

pub mod analytics;
pub mod cashflows;
pub mod error;
pub mod instruments;
pub mod pricing;

/// Prelude module for convenient imports.
pub mod prelude {
    // Analytics
    pub use crate::analytics::{
        dv01, realized_compounded_yield, yield_to_maturity, yield_to_maturity_with, BondMetrics,
    };

    // Cash flows
    pub use crate::cashflows::CashFlowBuilder;

    // Errors
    pub use crate::error::{BondError, BondResult};

    // Instruments
    pub use crate::instruments::{Bond, BondBuilder};

    // Pricing
    pub use crate::pricing::{npv, npv_derivative, PricingEngine, YieldResult, YieldSolver};
}

pub use analytics::BondMetrics;
pub use error::{BondError, BondResult};
pub use instruments::{Bond, BondBuilder};
pub use pricing::{PricingEngine, YieldSolver};
