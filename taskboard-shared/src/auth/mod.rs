/// Authorization
///
/// - `permissions`: the role-based permission gate, pure predicates plus
///   `require_*` helpers for handlers
/// - `context`: the per-request actor identity the gate is evaluated against

pub mod context;
pub mod permissions;
