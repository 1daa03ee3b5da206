//! In-memory adapters for the access context.

mod friendships;
mod memberships;

pub use friendships::InMemoryFriendshipStore;
pub use memberships::InMemoryMembershipStore;
