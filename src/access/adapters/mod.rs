//! Persistence adapters for the access module.
//!
//! Concrete implementations of the [`MembershipRepository`] and
//! [`FriendshipRepository`] ports:
//!
//! - [`memory::InMemoryMembershipStore`] and
//!   [`memory::InMemoryFriendshipStore`]: thread-safe in-memory storage for
//!   unit testing
//! - [`postgres::PostgresMembershipRepository`] and
//!   [`postgres::PostgresFriendshipRepository`]: production `PostgreSQL`
//!   persistence using Diesel
//!
//! [`MembershipRepository`]: crate::access::ports::MembershipRepository
//! [`FriendshipRepository`]: crate::access::ports::FriendshipRepository

pub mod memory;
pub mod postgres;
