//! Domain types for shipment summaries.
//!
//! - `MonthlyVolume`, `StatusCounts`, `Alert`: derived, never stored
//! - `QueryError` / `ValidationError`: failure taxonomy of the query surface

pub mod error;
pub mod summary;

pub use error::{QueryError, Result, ValidationError};
pub use summary::{Alert, AlertKind, MonthlyVolume, StatusCounts};
