//! # Varcalc Analytics Engine
//!
//! This crate provides the sample statistics behind the return-series mode of the
//! portfolio variance calculator, and the report type handed to presenters.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `StatisticsEngine` is a stateless calculator. It takes
//!   a return series as input and produces means and covariances as output. Degenerate
//!   inputs (a single observation) yield non-finite numbers rather than errors.
//!
//! ## Public API
//!
//! - `StatisticsEngine`: Means, sample covariances and the sample covariance matrix.
//! - `RiskReport`: The standardized, serializable summary of one computation.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::StatisticsEngine;
pub use report::RiskReport;
