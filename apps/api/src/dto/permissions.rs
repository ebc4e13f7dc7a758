mod conversions;
mod types;

pub use types::{
    RevokeAttemptListQuery, RevokeAttemptResponse, RevokePermissionRequest,
    RevokePermissionResponse,
};
