//! Local storage for uploaded files.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::slugify;

const AIRPLANE_DIR: &str = "uploads/airplanes";

/// Files under a media root, addressed by paths relative to that root.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Relative path for a new airplane image:
    /// `uploads/airplanes/<slug(name)>-<uuid>-<stem><ext>`.
    pub fn airplane_image_path(airplane_name: &str, original_filename: &str) -> String {
        let original = Path::new(original_filename);
        let stem = original
            .file_stem()
            .map(|s| slugify(&s.to_string_lossy()))
            .unwrap_or_default();
        let extension = original
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|e| format!(".{e}"))
            .unwrap_or_default();

        format!(
            "{AIRPLANE_DIR}/{}-{}-{stem}{extension}",
            slugify(airplane_name),
            Uuid::new_v4()
        )
    }

    /// Write an airplane image and return its relative path.
    pub async fn save_airplane_image(
        &self,
        airplane_name: &str,
        original_filename: &str,
        bytes: &[u8],
    ) -> DomainResult<String> {
        let relative = Self::airplane_image_path(airplane_name, original_filename);
        let target = self.resolve(&relative)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;
        Ok(relative)
    }

    /// Remove a stored file. A file that is already gone is not an error.
    pub async fn remove(&self, relative: &str) -> DomainResult<()> {
        let target = self.resolve(relative)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Absolute location of a relative media path. Paths escaping the root
    /// are rejected.
    pub fn resolve(&self, relative: &str) -> DomainResult<PathBuf> {
        let path = Path::new(relative);
        let safe = path
            .components()
            .all(|c| matches!(c, std::path::Component::Normal(_)));
        if !safe || relative.is_empty() {
            return Err(DomainError::StorageError(format!("invalid media path: {relative}")));
        }
        Ok(self.root.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airplane_image_path() {
        let path = MediaStore::airplane_image_path("Boeing 747", "My Photo.PNG");
        assert!(path.starts_with("uploads/airplanes/boeing-747-"));
        assert!(path.ends_with("-my-photo.png"));

        let bare = MediaStore::airplane_image_path("Jet", "noext");
        assert!(bare.ends_with("-noext"));
    }

    #[test]
    fn test_resolve_rejects_escapes() {
        let store = MediaStore::new("/srv/media");
        assert!(store.resolve("../etc/passwd").is_err());
        assert!(store.resolve("/etc/passwd").is_err());
        assert!(store.resolve("").is_err());
        assert_eq!(
            store.resolve("uploads/a.png").unwrap(),
            PathBuf::from("/srv/media/uploads/a.png")
        );
    }

    #[tokio::test]
    async fn test_save_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        let relative = store
            .save_airplane_image("Jet", "photo.jpg", b"not really a jpeg")
            .await
            .unwrap();
        let absolute = store.resolve(&relative).unwrap();
        assert_eq!(std::fs::read(&absolute).unwrap(), b"not really a jpeg");

        store.remove(&relative).await.unwrap();
        assert!(!absolute.exists());
        store.remove(&relative).await.unwrap();
    }
}
