//! Backend-agnostic persistence contract.
//!
//! The resolver decides, per call, whether the remote store or the local
//! fallback serves a request:
//!
//! - listing falls back to local enumeration on transient remote failure
//!   and flags the session as degraded;
//! - loading is routed by the id's tag and never falls back, so the caller
//!   always knows which backend is authoritative for a file;
//! - saving promotes local ids to remote ids when the namespace is remote
//!   again, and surfaces every remote write failure instead of quietly
//!   downgrading to a local save.

use parking_lot::Mutex;
use std::sync::Arc;

use travelbook_core::Itinerary;

use crate::drive::{DriveClient, PersistedFile};
use crate::error::StoreError;
use crate::file_id::FileId;
use crate::local::LocalStore;

/// Which namespace a session is operating against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceHandle {
    /// Remote namespace; carries the per-user container id used for creates.
    Remote { user_folder_id: String },
    /// Local fallback namespace; the session is degraded.
    Local,
}

impl NamespaceHandle {
    /// True when listing/loading succeeded only via the local fallback.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Local)
    }
}

/// Result of [`StoreResolver::list_files`].
#[derive(Debug, Clone)]
pub struct ListOutcome {
    pub handle: NamespaceHandle,
    pub files: Vec<PersistedFile>,
    /// Explicit disclosure flag for the UI; equals `handle.is_degraded()`.
    pub degraded: bool,
}

/// Decides which backend serves a given (user, file) pair.
pub struct StoreResolver {
    drive: DriveClient,
    local: Arc<Mutex<LocalStore>>,
}

impl StoreResolver {
    pub fn new(drive: DriveClient, local: LocalStore) -> Self {
        Self {
            drive,
            local: Arc::new(Mutex::new(local)),
        }
    }

    /// List the files available to `username`.
    ///
    /// Tries the remote store first. Transient failures (network, malformed
    /// responses) degrade to a local enumeration; a missing root container
    /// is a configuration problem and propagates verbatim.
    pub async fn list_files(&self, username: &str) -> Result<ListOutcome, StoreError> {
        match self.drive.list_files(username).await {
            Ok(listing) => Ok(ListOutcome {
                handle: NamespaceHandle::Remote {
                    user_folder_id: listing.user_folder_id,
                },
                files: listing.files,
                degraded: false,
            }),
            Err(e @ StoreError::RootFolderMissing { .. }) => Err(e),
            Err(e) => {
                tracing::warn!("Remote listing failed, falling back to local store: {}", e);
                let username = username.to_string();
                let files = self
                    .with_local(move |store| store.list_files(&username))
                    .await?;
                Ok(ListOutcome {
                    handle: NamespaceHandle::Local,
                    files,
                    degraded: true,
                })
            }
        }
    }

    /// Load one itinerary.
    ///
    /// The id's tag picks the backend; a remote failure is a hard error
    /// rather than a silent demotion to the fallback store.
    pub async fn load(&self, file_id: &FileId) -> Result<Itinerary, StoreError> {
        match file_id {
            FileId::Local(id) => {
                let id = id.clone();
                self.with_local(move |store| store.load(&id)).await
            }
            FileId::Remote(id) => self.drive.get_file(id).await,
        }
    }

    /// Save an itinerary, returning the id that now owns it.
    ///
    /// Case order matters:
    /// 1. a degraded (local) namespace always saves locally;
    /// 2. a local id under a remote namespace is promoted: one remote
    ///    create, one new id — the caller must adopt the returned id;
    /// 3. otherwise a plain remote create-or-update.
    ///
    /// In case 1 a remote id cannot be reused as the storage key (loads
    /// route by the id's tag), so such a save lands in a fresh local copy
    /// with a new local id; the remote file is left untouched. Like
    /// promotion, the caller must adopt the returned id.
    ///
    /// Remote failures in cases 2 and 3 propagate; they are never converted
    /// into a local save behind the caller's back.
    pub async fn save(
        &self,
        username: &str,
        data: &Itinerary,
        file_name: &str,
        existing: Option<&FileId>,
        handle: &NamespaceHandle,
    ) -> Result<FileId, StoreError> {
        match handle {
            NamespaceHandle::Local => {
                let existing_local = existing
                    .filter(|id| id.is_local())
                    .map(|id| id.as_str().to_string());
                let username = username.to_string();
                let file_name = file_name.to_string();
                let data = data.clone();
                self.with_local(move |store| {
                    store.save(&username, &file_name, &data, existing_local.as_deref())
                })
                .await
            }
            NamespaceHandle::Remote { user_folder_id } => match existing {
                Some(FileId::Local(old_id)) => {
                    tracing::info!("Promoting local file {} to remote storage", old_id);
                    let new_id = self
                        .drive
                        .create_file(user_folder_id, file_name, data)
                        .await?;

                    // The remote copy is now authoritative; dropping the
                    // superseded local copy is best effort.
                    let username = username.to_string();
                    let old_id = old_id.clone();
                    if let Err(e) = self
                        .with_local(move |store| store.remove(&username, &old_id))
                        .await
                    {
                        tracing::warn!("Failed to drop promoted local file: {}", e);
                    }

                    Ok(FileId::Remote(new_id))
                }
                Some(FileId::Remote(id)) => {
                    let id = self.drive.update_file(id, data).await?;
                    Ok(FileId::Remote(id))
                }
                None => {
                    let id = self
                        .drive
                        .create_file(user_folder_id, file_name, data)
                        .await?;
                    Ok(FileId::Remote(id))
                }
            },
        }
    }

    async fn with_local<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&LocalStore) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let local = Arc::clone(&self.local);
        tokio::task::spawn_blocking(move || {
            let store = local.lock();
            f(&store)
        })
        .await
        .map_err(|e| StoreError::local(format!("local store task failed: {e}")))?
    }
}

impl std::fmt::Debug for StoreResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreResolver").finish_non_exhaustive()
    }
}
