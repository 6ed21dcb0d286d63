use std::sync::Arc;
use chrono::{Datelike, NaiveDate, Weekday};

use shared_config::AppConfig;

use crate::dates::add_days;

/// Configuration knobs tests usually want to tighten.
pub struct TestConfig {
    pub default_max_per_slot: u32,
    pub doctor_max_per_day: u32,
    pub room_max_per_day: u32,
    pub search_horizon_days: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            default_max_per_slot: 3,
            doctor_max_per_day: 50,
            room_max_per_day: 300,
            search_horizon_days: 14,
        }
    }
}

impl TestConfig {
    pub fn with_slot_capacity(mut self, capacity: u32) -> Self {
        self.default_max_per_slot = capacity;
        self
    }

    pub fn with_daily_limits(mut self, room: u32, doctor: u32) -> Self {
        self.room_max_per_day = room;
        self.doctor_max_per_day = doctor;
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            default_max_per_slot: self.default_max_per_slot,
            doctor_max_per_day: self.doctor_max_per_day,
            room_max_per_day: self.room_max_per_day,
            search_horizon_days: self.search_horizon_days,
            default_operator: "test-user".to_string(),
            ..AppConfig::default()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// First date on or after `from` that falls on `weekday`.
pub fn next_weekday(from: NaiveDate, weekday: Weekday) -> NaiveDate {
    let mut current = from;
    while current.weekday() != weekday {
        current = add_days(current, 1).expect("date within calendar range");
    }
    current
}
