//! Items nearly every feature slice imports.

pub use crate::domain::config::ApiConfig;
pub use crate::domain::registry::{FeatureSlice, InitializedSlice};
pub use crate::safe_nanoid;
pub use crate::security::FileNameGuard;
#[cfg(feature = "server")]
pub use crate::server::{ApiError, ApiResult, ApiState};
