//! Persistence for TravelBook itineraries.
//!
//! Three substitutable backends sit behind one contract: a remote document
//! store reached through a drive proxy ([`DriveClient`]), and an on-device
//! fallback store ([`LocalStore`]). The [`StoreResolver`] decides which one
//! serves a given request, falls back to local storage when the remote is
//! unreachable on the read path, and promotes locally created files to
//! remote identities once connectivity returns.

pub mod drive;
pub mod error;
pub mod file_id;
pub mod local;
pub mod resolver;

pub use drive::{DriveClient, FileListing, PersistedFile};
pub use error::StoreError;
pub use file_id::{FileId, LOCAL_ID_PREFIX};
pub use local::LocalStore;
pub use resolver::{ListOutcome, NamespaceHandle, StoreResolver};
