//! Airplane types, airplanes and their images.

use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::validation::validate_image_size;
use crate::domain::models::{
    Airplane, AirplaneInput, AirplaneSortField, AirplaneType, AirplaneTypeInput, Ordering, Page,
    PageRequest,
};
use crate::domain::ports::{AirplaneRepository, AirplaneTypeRepository};
use crate::infrastructure::MediaStore;

pub struct FleetService {
    types: Arc<dyn AirplaneTypeRepository>,
    airplanes: Arc<dyn AirplaneRepository>,
    media: MediaStore,
    max_image_bytes: u64,
}

impl FleetService {
    pub fn new(
        types: Arc<dyn AirplaneTypeRepository>,
        airplanes: Arc<dyn AirplaneRepository>,
        media: MediaStore,
        max_image_bytes: u64,
    ) -> Self {
        Self {
            types,
            airplanes,
            media,
            max_image_bytes,
        }
    }

    fn name_taken(err: DomainError) -> DomainError {
        match err {
            DomainError::Conflict(message) => DomainError::invalid_field("name", message),
            other => other,
        }
    }

    pub async fn create_type(&self, input: &AirplaneTypeInput) -> DomainResult<AirplaneType> {
        input.validate()?;
        self.types.create(input).await.map_err(Self::name_taken)
    }

    pub async fn get_type(&self, id: i64) -> DomainResult<AirplaneType> {
        self.types
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("airplane type", id))
    }

    pub async fn update_type(&self, id: i64, input: &AirplaneTypeInput) -> DomainResult<AirplaneType> {
        input.validate()?;
        self.types.update(id, input).await.map_err(Self::name_taken)
    }

    pub async fn delete_type(&self, id: i64) -> DomainResult<()> {
        self.types.delete(id).await
    }

    pub async fn list_types(&self, page: PageRequest) -> DomainResult<Page<AirplaneType>> {
        self.types.list(page).await
    }

    async fn check_airplane_input(&self, input: &AirplaneInput) -> DomainResult<()> {
        input.validate()?;
        if self.types.get(input.airplane_type_id).await?.is_none() {
            return Err(DomainError::invalid_pk("airplane_type", input.airplane_type_id));
        }
        Ok(())
    }

    pub async fn create_airplane(&self, input: &AirplaneInput) -> DomainResult<Airplane> {
        self.check_airplane_input(input).await?;
        let airplane = self.airplanes.create(input).await?;
        tracing::info!(airplane_id = airplane.id, name = %airplane.name, "airplane created");
        Ok(airplane)
    }

    pub async fn get_airplane(&self, id: i64) -> DomainResult<Airplane> {
        self.airplanes
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("airplane", id))
    }

    pub async fn update_airplane(&self, id: i64, input: &AirplaneInput) -> DomainResult<Airplane> {
        self.check_airplane_input(input).await?;
        self.airplanes.update(id, input).await
    }

    /// Delete an airplane and, best effort, its image file.
    pub async fn delete_airplane(&self, id: i64) -> DomainResult<()> {
        let airplane = self.get_airplane(id).await?;
        self.airplanes.delete(id).await?;
        if let Some(image) = airplane.image.as_deref() {
            self.discard_image(id, image).await;
        }
        tracing::info!(airplane_id = id, "airplane deleted");
        Ok(())
    }

    pub async fn list_airplanes(
        &self,
        ordering: Option<&Ordering<AirplaneSortField>>,
        page: PageRequest,
    ) -> DomainResult<Page<Airplane>> {
        self.airplanes.list(ordering, page).await
    }

    /// Store a new image for an airplane, replacing the previous one.
    pub async fn upload_image(&self, id: i64, filename: &str, bytes: &[u8]) -> DomainResult<Airplane> {
        validate_image_size(bytes.len() as u64, self.max_image_bytes)?;
        let airplane = self.get_airplane(id).await?;

        let path = self
            .media
            .save_airplane_image(&airplane.name, filename, bytes)
            .await?;
        let updated = match self.airplanes.set_image(id, Some(&path)).await {
            Ok(updated) => updated,
            Err(e) => {
                self.discard_image(id, &path).await;
                return Err(e);
            }
        };

        if let Some(previous) = airplane.image.as_deref() {
            self.discard_image(id, previous).await;
        }
        tracing::info!(airplane_id = id, image = %path, size = bytes.len(), "airplane image uploaded");
        Ok(updated)
    }

    async fn discard_image(&self, airplane_id: i64, path: &str) {
        if let Err(e) = self.media.remove(path).await {
            tracing::warn!(airplane_id, image = %path, error = %e, "failed to remove airplane image");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{
        create_migrated_test_pool, SqliteAirplaneRepository, SqliteAirplaneTypeRepository,
    };
    use tempfile::TempDir;

    async fn setup(max_image_bytes: u64) -> (FleetService, TempDir) {
        let pool = create_migrated_test_pool().await.unwrap();
        let media_dir = tempfile::tempdir().unwrap();
        let service = FleetService::new(
            Arc::new(SqliteAirplaneTypeRepository::new(pool.clone())),
            Arc::new(SqliteAirplaneRepository::new(pool)),
            MediaStore::new(media_dir.path()),
            max_image_bytes,
        );
        (service, media_dir)
    }

    async fn airplane(service: &FleetService) -> Airplane {
        let kind = service
            .create_type(&AirplaneTypeInput { name: "Boeing".to_string() })
            .await
            .unwrap();
        service
            .create_airplane(&AirplaneInput {
                name: "Dreamliner".to_string(),
                rows: 20,
                seats_in_row: 6,
                airplane_type_id: kind.id,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_unknown_type_is_field_error() {
        let (service, _dir) = setup(1024).await;
        let result = service
            .create_airplane(&AirplaneInput {
                name: "Ghost".to_string(),
                rows: 1,
                seats_in_row: 1,
                airplane_type_id: 42,
            })
            .await;
        assert!(matches!(
            result,
            Err(DomainError::InvalidField { ref field, .. }) if field == "airplane_type"
        ));
    }

    #[tokio::test]
    async fn test_duplicate_type_name_is_field_error() {
        let (service, _dir) = setup(1024).await;
        let input = AirplaneTypeInput { name: "Embraer".to_string() };
        service.create_type(&input).await.unwrap();

        match service.create_type(&input).await {
            Err(DomainError::InvalidField { field, message }) => {
                assert_eq!(field, "name");
                assert_eq!(message, "airplane type with this name already exists.");
            }
            other => panic!("expected field error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_upload_replaces_previous_image() {
        let (service, dir) = setup(1024).await;
        let airplane = airplane(&service).await;

        let first = service.upload_image(airplane.id, "a.png", b"first").await.unwrap();
        let first_path = first.image.clone().unwrap();
        assert!(first_path.starts_with("uploads/airplanes/dreamliner-"));
        assert!(dir.path().join(&first_path).exists());

        let second = service.upload_image(airplane.id, "b.png", b"second").await.unwrap();
        let second_path = second.image.unwrap();
        assert!(!dir.path().join(&first_path).exists());
        assert!(dir.path().join(&second_path).exists());

        service.delete_airplane(airplane.id).await.unwrap();
        assert!(!dir.path().join(&second_path).exists());
    }

    #[tokio::test]
    async fn test_oversized_image_is_rejected() {
        let (service, dir) = setup(4).await;
        let airplane = airplane(&service).await;

        let result = service.upload_image(airplane.id, "big.png", b"too large").await;
        assert!(matches!(
            result,
            Err(DomainError::InvalidField { ref field, .. }) if field == "image"
        ));
        assert!(!dir.path().join("uploads").exists());
    }

    #[tokio::test]
    async fn test_missing_airplane() {
        let (service, _dir) = setup(1024).await;
        assert!(matches!(
            service.get_airplane(7).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.upload_image(7, "a.png", b"x").await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
