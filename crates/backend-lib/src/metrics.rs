// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const AUTH_SIGN_UP: &str = "auth.sign_up";
pub const AUTH_SIGN_IN: &str = "auth.sign_in";
pub const AUTH_SIGN_IN_REJECTED: &str = "auth.sign_in.rejected";
pub const GATE_REJECTED: &str = "auth.gate.rejected";
pub const TASK_CREATED: &str = "task.created";
pub const TASK_DELETED: &str = "task.deleted";
