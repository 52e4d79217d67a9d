//! Child support worksheet engine
//!
//! This crate computes a recommended monthly child support order from two
//! parents' incomes, the number of children, the custody arrangement, and
//! add-on expenses, using an income/obligation schedule loaded from YAML.
//! Primary custody cases run through Worksheet A; shared custody cases run
//! through Worksheet B, which falls back to Worksheet A when either parent
//! has fewer than 25% of the year's overnights.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
