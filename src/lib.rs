//! CLT vs PJ Engine for Brazilian employment regimes
//!
//! This crate compares take-home pay under a salaried contract (CLT) with
//! contracting through a Simples Nacional company (PJ), using the 2025 INSS,
//! IRRF and Simples Nacional tables, and finds the PJ invoice that matches a
//! CLT offer.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

pub use calculation::{calculate_clt, calculate_pj, compare, find_break_even};
pub use error::{EngineError, EngineResult};
