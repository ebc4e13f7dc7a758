mod common;
mod permissions;

pub use common::{HealthDependencyStatus, HealthResponse};
pub use permissions::{
    RevokeAttemptListQuery, RevokeAttemptResponse, RevokePermissionRequest,
    RevokePermissionResponse,
};
