//! Crew members assignable to flights.

use serde::{Deserialize, Serialize};

use super::validation::require_text;
use crate::domain::errors::DomainResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crew {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl Crew {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrewInput {
    pub first_name: String,
    pub last_name: String,
}

impl CrewInput {
    pub fn validate(&self) -> DomainResult<()> {
        require_text("first_name", &self.first_name, 255)?;
        require_text("last_name", &self.last_name, 255)
    }
}

impl From<&Crew> for CrewInput {
    fn from(crew: &Crew) -> Self {
        Self {
            first_name: crew.first_name.clone(),
            last_name: crew.last_name.clone(),
        }
    }
}
