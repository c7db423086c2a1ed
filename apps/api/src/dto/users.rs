mod conversions;
mod types;

pub use types::{CreateUserRequest, UpdateUserRequest, UserListParams, UserResponse};
