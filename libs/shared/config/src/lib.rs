use std::env;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub default_max_per_slot: u32,
    pub doctor_max_per_day: u32,
    pub room_max_per_day: u32,
    pub search_horizon_days: u32,
    pub calendar_data_path: Option<String>,
    pub patient_data_path: Option<String>,
    pub default_operator: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            default_max_per_slot: 3,
            doctor_max_per_day: 50,
            room_max_per_day: 300,
            search_horizon_days: 14,
            calendar_data_path: None,
            patient_data_path: None,
            default_operator: "demo-user".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| {
                    warn!("SERVER_HOST not set, using {}", defaults.server_host);
                    defaults.server_host.clone()
                }),
            server_port: parse_var("SERVER_PORT", defaults.server_port),
            default_max_per_slot: parse_var("DEFAULT_MAX_APPOINTMENTS_PER_SLOT", defaults.default_max_per_slot),
            doctor_max_per_day: parse_var("DOCTOR_MAX_APPOINTMENTS_PER_DAY", defaults.doctor_max_per_day),
            room_max_per_day: parse_var("ROOM_MAX_APPOINTMENTS_PER_DAY", defaults.room_max_per_day),
            search_horizon_days: parse_var("SEARCH_HORIZON_DAYS", defaults.search_horizon_days),
            calendar_data_path: env::var("CALENDAR_DATA_PATH").ok().filter(|p| !p.is_empty()),
            patient_data_path: env::var("PATIENT_DATA_PATH").ok().filter(|p| !p.is_empty()),
            default_operator: env::var("DEFAULT_OPERATOR")
                .unwrap_or_else(|_| defaults.default_operator.clone()),
        };

        if !config.is_configured() {
            warn!("Reference data files not configured - serving built-in demo catalog");
        }

        config
    }

    /// True when both reference-data files come from the configuration collaborator.
    pub fn is_configured(&self) -> bool {
        self.calendar_data_path.is_some() && self.patient_data_path.is_some()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {}", name, raw, default);
            default
        }),
        Err(_) => {
            warn!("{} not set, using default {}", name, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_capacity_policy() {
        let config = AppConfig::default();
        assert_eq!(config.default_max_per_slot, 3);
        assert_eq!(config.doctor_max_per_day, 50);
        assert_eq!(config.room_max_per_day, 300);
        assert_eq!(config.search_horizon_days, 14);
        assert!(!config.is_configured());
    }

    #[test]
    fn test_bind_address() {
        let config = AppConfig {
            server_port: 8080,
            ..AppConfig::default()
        };
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_parse_var_falls_back_on_garbage() {
        env::set_var("OUTPATIENT_TEST_GARBAGE_PORT", "not-a-number");
        assert_eq!(parse_var("OUTPATIENT_TEST_GARBAGE_PORT", 42u16), 42);
        env::remove_var("OUTPATIENT_TEST_GARBAGE_PORT");
    }
}
