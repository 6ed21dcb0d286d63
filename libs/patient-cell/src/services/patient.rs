use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

use shared_config::AppConfig;

use crate::models::{Patient, PatientError};

/// Shortest query accepted by the patient search.
pub const MIN_SEARCH_LENGTH: usize = 2;
const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Read-only patient directory supplied by the configuration collaborator.
#[derive(Debug, Clone, Default)]
pub struct PatientDirectory {
    patients: Vec<Patient>,
}

impl PatientDirectory {
    pub fn new(patients: Vec<Patient>) -> Result<Self, PatientError> {
        let mut ids = HashSet::new();
        let mut hns = HashSet::new();
        for patient in &patients {
            if !ids.insert(patient.id.as_str()) {
                return Err(PatientError::ReferenceData(format!("duplicate patient id {}", patient.id)));
            }
            if !hns.insert(patient.hn.as_str()) {
                return Err(PatientError::ReferenceData(format!("duplicate HN {}", patient.hn)));
            }
        }

        Ok(Self { patients })
    }

    /// Reads `PATIENT_DATA_PATH` when configured, otherwise the demo directory.
    pub fn load(config: &AppConfig) -> Result<Self> {
        let patients = match config.patient_data_path.as_deref() {
            Some(path) => read_patients(Path::new(path))?,
            None => {
                info!("Using built-in demo patient directory");
                demo_patients()
            }
        };

        Ok(Self::new(patients)?)
    }

    pub fn all(&self) -> &[Patient] {
        &self.patients
    }

    pub fn get(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&Patient, PatientError> {
        self.get(id).ok_or_else(|| PatientError::NotFound(id.to_string()))
    }

    /// Search by HN, CID or name. Queries shorter than two characters return nothing.
    pub fn search(&self, query: &str, limit: Option<usize>) -> Vec<&Patient> {
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_LENGTH {
            return Vec::new();
        }

        let results: Vec<&Patient> = self
            .patients
            .iter()
            .filter(|p| p.matches(query))
            .take(limit.unwrap_or(DEFAULT_SEARCH_LIMIT))
            .collect();

        debug!("Patient search {:?} matched {} patients", query, results.len());
        results
    }
}

fn read_patients(path: &Path) -> Result<Vec<Patient>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading patient directory from {}", path.display()))?;
    let patients: Vec<Patient> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing patient directory in {}", path.display()))?;

    info!("Loaded {} patients from {}", patients.len(), path.display());
    Ok(patients)
}

pub fn demo_patients() -> Vec<Patient> {
    const NAMES: &[(&str, &str, &str)] = &[
        ("Mr.", "Somchai", "Mankong"),
        ("Mrs.", "Somying", "Rakdee"),
        ("Ms.", "Suayngam", "Jaidee"),
        ("Mr.", "Mana", "Payayam"),
        ("Mrs.", "Wandee", "Sukjai"),
        ("Mr.", "Prasert", "Saksit"),
        ("Ms.", "Dao", "Sawang"),
        ("Mr.", "Thana", "Ruamruay"),
        ("Mrs.", "Malee", "Dokmai"),
        ("Mr.", "Surachai", "Khemkhaeng"),
        ("Ms.", "Rattana", "Petchngam"),
        ("Mr.", "Weera", "Klahan"),
        ("Mrs.", "Siriporn", "Charoenrung"),
        ("Mr.", "Pichai", "Chaichana"),
        ("Ms.", "Kanya", "Sudsuay"),
        ("Mr.", "Anan", "Maisinsud"),
        ("Mrs.", "Boonmee", "Chokdee"),
        ("Mr.", "Kriangkrai", "Yingyai"),
        ("Ms.", "Namfon", "Yenjai"),
        ("Mr.", "Somsak", "Saksri"),
    ];

    NAMES
        .iter()
        .enumerate()
        .map(|(i, (title, first, last))| {
            let i = i as u32;
            Patient {
                id: format!("patient-{}", i + 1),
                hn: format!("HN{}", 100_000 + i),
                cid: format!("{}", 1_100_000_000_000u64 + u64::from(i) * 12_345),
                title: Some(title.to_string()),
                first_name: first.to_string(),
                last_name: last.to_string(),
                birth_date: NaiveDate::from_ymd_opt(1960 + (i as i32 * 2), 1 + i % 12, 1 + (i * 3) % 28),
                phone: Some(format!("08{:08}", 12_345_678 + i * 1_111)),
            }
        })
        .collect()
}
