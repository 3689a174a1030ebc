//! Views Module
//!
//! Derived view objects that consumers memoize in the [`ViewCache`](crate::cache::ViewCache),
//! and the lookup collaborators they are built from.

mod directory;
mod profile;

pub use directory::{Avatar, InMemoryDirectory, UserDirectory, UserRecord};
pub use profile::{BaseUser, ProfileLookup, ProfileViews};
