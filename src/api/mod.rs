//! HTTP API module for the worksheet engine.
//!
//! This module provides the REST endpoints for calculating a case against
//! the loaded schedule and for describing that schedule.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CaseRequest;
pub use response::{ApiError, CalculationResponse, ScheduleSummary};
pub use state::AppState;
