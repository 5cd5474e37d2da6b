//! Player Registry - Maps free-form NFL player names to stable player IDs
//!
//! This module canonicalizes names coming from rankings files and stat feeds
//! so that both sides of a comparison agree on who a player is.

pub mod directory;
pub mod registry;
pub mod types;

pub use directory::EntityDirectory;
pub use registry::NameResolver;
pub use types::{Entity, PositionGroup, ResolveError};
