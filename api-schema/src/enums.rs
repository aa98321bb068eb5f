//! Enum numbers used by the API messages.
//!
//! Enums are open: decoding keeps numbers outside these lists as-is.

pub mod application_kind {
    pub const KUBERNETES: i32 = 0;
    pub const TERRAFORM: i32 = 1;
    pub const LAMBDA: i32 = 3;
    pub const CLOUDRUN: i32 = 4;
    pub const ECS: i32 = 5;
}

pub mod application_sync_status {
    pub const UNKNOWN: i32 = 0;
    pub const SYNCED: i32 = 1;
    pub const DEPLOYING: i32 = 2;
    pub const OUT_OF_SYNC: i32 = 3;
    pub const INVALID_CONFIG: i32 = 4;
}

pub mod event_status {
    pub const NOT_HANDLED: i32 = 0;
    pub const SUCCESS: i32 = 1;
    pub const FAILURE: i32 = 2;
    pub const OUTDATED: i32 = 3;
}

/// `model.Piped.ConnectionStatus`.
pub mod piped_status {
    pub const UNKNOWN: i32 = 0;
    pub const ONLINE: i32 = 1;
    pub const OFFLINE: i32 = 2;
}
