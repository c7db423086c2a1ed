mod conversions;
mod types;

pub use types::{RoleListParams, RoleRequest, RoleResponse};
