use super::{Document, DocumentCreate, DocumentUpdate};
use crate::{Error, Result};
use chrono::{Duration, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const EXTENSION: &str = "json";

/// One pretty-printed JSON file per document, named `<id>.json`, in a flat directory.
///
/// The directory is created on first write. Nothing here serializes updates or
/// deletes against each other; concurrent writers to the same id race and the
/// last write wins.
pub struct DocumentStore {
    dir: PathBuf,
    // Held across "read max id, write new file" so two creates in this
    // process cannot pick the same id.
    create_lock: Mutex<()>,
}

impl DocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            create_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{id}.{EXTENSION}"))
    }

    pub async fn create(&self, new: DocumentCreate) -> Result<Document> {
        let _guard = self.create_lock.lock().await;

        let id = match self.ids().await?.last() {
            Some(&max) => max.checked_add(1).ok_or(Error::IdsExhausted { max })?,
            None => 1,
        };
        let document = Document::new(id, new.title, new.content);
        self.save(&document).await?;

        info!("Created document {}", id);
        Ok(document)
    }

    /// Loads a document, repairing it in place if the stored entry is unreadable.
    pub async fn get(&self, id: u64) -> Result<Document> {
        let bytes = match tokio::fs::read(self.path_for(id)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(Error::NotFound { id }),
            Err(e) => return Err(e.into()),
        };

        match decode(id, &bytes) {
            Ok(document) => {
                debug!("Loaded document {}", id);
                Ok(document)
            }
            Err(Error::CorruptEntry { reason, .. }) => {
                warn!("Document {} is corrupt ({}), replacing with default", id, reason);
                self.repair(id).await
            }
            Err(e) => Err(e),
        }
    }

    /// All loadable documents in ascending id order. Entries that cannot be
    /// loaded even after repair are logged and skipped.
    pub async fn list(&self) -> Result<Vec<Document>> {
        let ids = self.ids().await?;
        let mut documents = Vec::with_capacity(ids.len());

        for id in ids {
            match self.get(id).await {
                Ok(document) => documents.push(document),
                Err(Error::NotFound { .. }) => {
                    debug!("Document {} disappeared while listing", id);
                }
                Err(e) => {
                    warn!("Skipping document {}: {}", id, e);
                }
            }
        }

        Ok(documents)
    }

    pub async fn update(&self, id: u64, update: DocumentUpdate) -> Result<Document> {
        let existing = self.get(id).await?;

        // updated_at must move forward even if the clock did not.
        let now = Utc::now();
        let updated_at = if now > existing.updated_at {
            now
        } else {
            existing.updated_at + Duration::microseconds(1)
        };

        let document = Document {
            id,
            title: update.title.unwrap_or(existing.title),
            content: update.content.unwrap_or(existing.content),
            created_at: existing.created_at,
            updated_at,
        };
        self.save(&document).await?;

        info!("Updated document {}", id);
        Ok(document)
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => {
                info!("Deleted document {}", id);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::NotFound { id }),
            Err(e) => Err(e.into()),
        }
    }

    /// Ids of every `<positive integer>.json` entry, ascending. A missing
    /// directory holds no documents.
    pub async fn ids(&self) -> Result<Vec<u64>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if let Some(id) = parse_key(&entry.path()) {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }

    async fn save(&self, document: &Document) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec_pretty(document)?;
        tokio::fs::write(self.path_for(document.id), bytes).await?;
        debug!("Saved document {} to {}", document.id, self.dir.display());
        Ok(())
    }

    /// Overwrites the entry with a placeholder. The previous bytes are lost.
    async fn repair(&self, id: u64) -> Result<Document> {
        let document = Document::placeholder(id);
        self.save(&document).await?;
        Ok(document)
    }
}

fn parse_key(path: &Path) -> Option<u64> {
    if path.extension()? != EXTENSION {
        return None;
    }
    let id: u64 = path.file_stem()?.to_str()?.parse().ok()?;
    (id > 0).then_some(id)
}

fn decode(id: u64, bytes: &[u8]) -> Result<Document> {
    let document: Document =
        serde_json::from_slice(bytes).map_err(|e| Error::corrupt(id, e.to_string()))?;

    if document.id != id {
        return Err(Error::corrupt(
            id,
            format!("stored id {} does not match key", document.id),
        ));
    }

    if document.created_at > document.updated_at {
        return Err(Error::corrupt(id, "created_at is later than updated_at"));
    }

    Ok(document)
}
