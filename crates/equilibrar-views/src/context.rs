use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use equilibrar_core::locale::Locale;

/// Everything a view reads from outside the dashboard: the clock, the
/// local time zone and the display locale. Injected so that rendering is
/// a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub now: Timestamp,
    pub tz: TimeZone,
    pub locale: Locale,
}

impl ViewContext {
    pub fn new(now: Timestamp, tz: TimeZone, locale: Locale) -> Self {
        Self { now, tz, locale }
    }

    pub fn today(&self) -> Date {
        self.now.to_zoned(self.tz.clone()).date()
    }
}

/// Dashboard tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Patients listed on the professional overview.
    pub patient_list_limit: usize,
    /// Clients a coordinator can manage.
    pub coordinator_capacity: usize,
    /// Cosmetic pause between assessment questions.
    pub advance_delay_ms: u64,
    /// Month the coordinator calendar opens on; the current month if unset.
    pub calendar_anchor: Option<Date>,
    /// Target shown next to the program completion rate.
    pub completion_goal_percent: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            patient_list_limit: 3,
            coordinator_capacity: 25,
            advance_delay_ms: 200,
            calendar_anchor: None,
            completion_goal_percent: 90.0,
        }
    }
}
