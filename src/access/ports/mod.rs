//! Port contracts for the access context.

mod friendship;
mod membership;

pub use friendship::{FriendshipRepository, FriendshipRepositoryError, FriendshipRepositoryResult};
pub use membership::{MembershipRepository, MembershipRepositoryError, MembershipRepositoryResult};
