//! # Bondyield Math
//!
//! Numerical utilities for the Bondyield fixed income metrics library.
//!
//! This crate provides:
//!
//! - **Solvers**: Root-finding algorithms (Newton-Raphson, Bisection, and a
//!   Newton + Bisection hybrid) with a shared [`SolverConfig`](solvers::SolverConfig)
//!
//! ## Design Philosophy
//!
//! - **Bounded**: Every iterative loop has a hard iteration cap
//! - **Numerical Stability**: Domain boundaries are respected, never stepped over
//! - **Stateless**: Solvers are plain functions over closures

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, find_bracket, hybrid, newton_raphson, SolverConfig, SolverMethod, SolverResult,
    };
}

pub use error::{MathError, MathResult};
