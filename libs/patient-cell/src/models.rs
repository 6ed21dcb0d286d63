use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

/// Patient as known to the hospital directory. `hn` is the hospital number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub hn: String,
    pub cid: String,
    #[serde(default)]
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive match over HN, CID and names.
    pub fn matches(&self, query: &str) -> bool {
        let lower = query.to_lowercase();
        self.hn.to_lowercase().contains(&lower)
            || self.cid.contains(query)
            || self.first_name.to_lowercase().contains(&lower)
            || self.last_name.to_lowercase().contains(&lower)
            || self.full_name().to_lowercase().contains(&lower)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSearchQuery {
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum PatientError {
    #[error("Patient not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Reference data error: {0}")]
    ReferenceData(String),
}
