use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Crew, CrewInput, Page, PageRequest};
use crate::domain::ports::CrewRepository;

pub struct CrewService {
    crew: Arc<dyn CrewRepository>,
}

impl CrewService {
    pub fn new(crew: Arc<dyn CrewRepository>) -> Self {
        Self { crew }
    }

    pub async fn create(&self, input: &CrewInput) -> DomainResult<Crew> {
        input.validate()?;
        self.crew.create(input).await
    }

    pub async fn get(&self, id: i64) -> DomainResult<Crew> {
        self.crew
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("crew", id))
    }

    pub async fn update(&self, id: i64, input: &CrewInput) -> DomainResult<Crew> {
        input.validate()?;
        self.crew.update(id, input).await
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.crew.delete(id).await
    }

    pub async fn list(&self, page: PageRequest) -> DomainResult<Page<Crew>> {
        self.crew.list(page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqliteCrewRepository};

    #[tokio::test]
    async fn test_blank_names_are_rejected() {
        let pool = create_migrated_test_pool().await.unwrap();
        let service = CrewService::new(Arc::new(SqliteCrewRepository::new(pool)));

        let result = service
            .create(&CrewInput { first_name: " ".to_string(), last_name: "Doe".to_string() })
            .await;
        assert!(matches!(
            result,
            Err(DomainError::InvalidField { ref field, .. }) if field == "first_name"
        ));

        let crew = service
            .create(&CrewInput { first_name: "Jane".to_string(), last_name: "Doe".to_string() })
            .await
            .unwrap();
        assert_eq!(service.get(crew.id).await.unwrap().full_name(), "Jane Doe");
    }
}
