//! `PostgreSQL` adapters for membership and friendship persistence.

mod friendships;
mod memberships;
mod schema;

pub use friendships::PostgresFriendshipRepository;
pub use memberships::{AccessPgPool, PostgresMembershipRepository};
