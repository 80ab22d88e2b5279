//! File-based Journey Store Adapter
//!
//! Stores each journey as a YAML file on disk, one file per journey id,
//! so journeys survive process restarts and stay easy to inspect.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::{DomainError, ErrorCode, JourneyId};
use crate::domain::journey::Journey;
use crate::ports::JourneyStore;

/// File-based storage for journeys
#[derive(Debug, Clone)]
pub struct FileJourneyStore {
    base_path: PathBuf,
}

impl FileJourneyStore {
    /// Create a new file store with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let store = FileJourneyStore::new("./data/journeys");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the file path for a journey
    fn journey_file_path(&self, id: &JourneyId) -> PathBuf {
        self.base_path.join(format!("{}.yaml", id))
    }

    async fn ensure_dir(&self) -> Result<(), DomainError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| storage_error("create directory", &self.base_path, e))
    }
}

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::StorageError, format!("failed to {}: {}", action, err))
        .with_detail("path", path.display().to_string())
}

#[async_trait]
impl JourneyStore for FileJourneyStore {
    async fn save(&self, journey: &Journey) -> Result<(), DomainError> {
        self.ensure_dir().await?;

        let file_path = self.journey_file_path(journey.id());
        let yaml = serde_yaml::to_string(journey)
            .map_err(|e| storage_error("serialize journey", &file_path, e))?;

        // Write then rename so readers never see a half-written file
        let tmp_path = file_path.with_extension("yaml.tmp");
        fs::write(&tmp_path, yaml)
            .await
            .map_err(|e| storage_error("write journey", &tmp_path, e))?;
        fs::rename(&tmp_path, &file_path)
            .await
            .map_err(|e| storage_error("replace journey", &file_path, e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &JourneyId) -> Result<Option<Journey>, DomainError> {
        let file_path = self.journey_file_path(id);

        let yaml = match fs::read_to_string(&file_path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error("read journey", &file_path, e)),
        };

        let journey = serde_yaml::from_str(&yaml)
            .map_err(|e| storage_error("deserialize journey", &file_path, e))?;

        Ok(Some(journey))
    }

    async fn exists(&self, id: &JourneyId) -> Result<bool, DomainError> {
        Ok(fs::try_exists(self.journey_file_path(id))
            .await
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileJourneyStore::new(temp_dir.path());
        let journey = Journey::start(JourneyId::new());

        store.save(&journey).await.unwrap();
        let loaded = store.find_by_id(journey.id()).await.unwrap();

        assert_eq!(loaded, Some(journey));
    }

    #[tokio::test]
    async fn missing_journey_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileJourneyStore::new(temp_dir.path());

        assert!(store.find_by_id(&JourneyId::new()).await.unwrap().is_none());
        assert!(!store.exists(&JourneyId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn creates_base_directory_on_first_save() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("journeys");
        let store = FileJourneyStore::new(&nested);
        let journey = Journey::start(JourneyId::new());

        store.save(&journey).await.unwrap();

        assert!(nested.join(format!("{}.yaml", journey.id())).exists());
        assert!(store.exists(journey.id()).await.unwrap());
    }

    #[tokio::test]
    async fn corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileJourneyStore::new(temp_dir.path());
        let id = JourneyId::new();
        std::fs::write(temp_dir.path().join(format!("{}.yaml", id)), ": not a journey").unwrap();

        let err = store.find_by_id(&id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
    }
}
