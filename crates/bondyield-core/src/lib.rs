//! # Bondyield Core
//!
//! Core types and abstractions for the Bondyield fixed income metrics library.
//!
//! This crate provides the foundational building blocks used throughout Bondyield:
//!
//! - **Types**: [`Period`] for coupon intervals and tenors, [`CashFlowSequence`]
//!   for the discrete cash flows of a bullet bond
//! - **Errors**: [`CoreError`] covering invalid periods and period arithmetic
//!
//! ## Example
//!
//! ```rust
//! use bondyield_core::prelude::*;
//!
//! let coupon = Period::months(6).unwrap();
//! let tenor = Period::years(5).unwrap();
//!
//! assert_eq!(tenor.divide(&coupon).unwrap(), 10);
//! assert!((coupon.fraction_of_year() - 0.5).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{CashFlowSequence, Period, PeriodUnit};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{CashFlowSequence, Period, PeriodUnit};
