//! Axum plumbing shared by every slice: state, error bodies and system routes.

mod error;
mod health;
mod router;
mod state;

pub use error::{ApiError, ApiErrorExt, ApiResult};
pub use router::system_router;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};
