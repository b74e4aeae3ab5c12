//! HTTP API module for the leave ledger engine.
//!
//! This module provides the REST endpoints for computing a year's ledger and
//! for previewing the paid/LOP split of a leave approval.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{LedgerRequest, SplitRequest, SplitResponse};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
