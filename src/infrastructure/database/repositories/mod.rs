//! Repositories: typed query operations over the entities
//!
//! Every owner-scoped query filters on the owning user id in SQL, so
//! cross-user access cannot be expressed by a caller.

pub mod operation_repository;
pub mod user_repository;

pub use operation_repository::{
    ListQuery, NewOperation, OperationPatch, OperationRepository, OperationStats, SortBy,
    SortOrder,
};
pub use user_repository::{NewUser, UserPatch, UserRepository};
