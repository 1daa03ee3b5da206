//! Orchestration services for the access context.

mod gate;
mod membership;

pub use gate::{GateError, GateResult, PermissionGate};
pub use membership::{MembershipService, MembershipServiceError, MembershipServiceResult};
