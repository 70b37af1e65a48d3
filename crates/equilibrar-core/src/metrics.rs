//! Derived figures shown on the dashboards.

use jiff::civil::Date;
use jiff::Span;
use serde::Serialize;

use crate::error::CoreError;
use crate::locale::Locale;
use crate::models::clinical::AudioUsage;
use crate::models::progress::{ProgramWeek, Progress};
use crate::models::roster::Roster;
use crate::models::user::{AccountStatus, Role};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyMinutes {
    pub day: &'static str,
    pub minutes: u32,
}

/// The demo week shown on the admin overview.
pub fn weekly_audio_usage_series() -> Vec<DailyMinutes> {
    [
        ("Lun", 45),
        ("Mar", 30),
        ("Mié", 0),
        ("Jue", 60),
        ("Vie", 25),
        ("Sáb", 15),
        ("Dom", 45),
    ]
    .into_iter()
    .map(|(day, minutes)| DailyMinutes { day, minutes })
    .collect()
}

/// Minutes listened per day of the Monday-first week containing `week_of`.
pub fn audio_usage_series(
    records: &[AudioUsage],
    week_of: Date,
    locale: Locale,
) -> Result<Vec<DailyMinutes>, CoreError> {
    let offset = i64::from(week_of.weekday().to_monday_zero_offset());
    let monday = week_of.checked_sub(Span::new().days(offset))?;

    let mut series = Vec::with_capacity(7);
    for i in 0..7 {
        let day = monday.checked_add(Span::new().days(i))?;
        let minutes = records
            .iter()
            .filter(|r| r.date == day)
            .map(|r| r.minutes_listened)
            .sum();
        series.push(DailyMinutes {
            day: locale.weekday_short(day.weekday()),
            minutes,
        });
    }
    Ok(series)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekMinutes {
    pub week: ProgramWeek,
    pub minutes: u32,
}

/// Program audio minutes reported for each week, first to last.
pub fn client_audio_minutes(progress: &Progress) -> Vec<WeekMinutes> {
    progress
        .iter()
        .map(|(week, p)| WeekMinutes {
            week,
            minutes: p.audio_listened,
        })
        .collect()
}

pub fn total_minutes_listened(records: &[AudioUsage]) -> u32 {
    records.iter().map(|r| r.minutes_listened).sum()
}

/// Share of the four-week program reached by a client in `week`.
pub fn program_progress_percent(week: ProgramWeek) -> u32 {
    u32::from(week.number()) * 100 / u32::from(ProgramWeek::COUNT)
}

pub fn progress_label(week: ProgramWeek, status: AccountStatus) -> &'static str {
    if !status.is_active() {
        "Pausado"
    } else if program_progress_percent(week) >= 75 {
        "Avanzado"
    } else {
        "En curso"
    }
}

/// Up to two initials from the first two words of a name.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleCounts {
    pub total: usize,
    pub admins: usize,
    pub coordinators: usize,
    pub professionals: usize,
    pub clients: usize,
    pub active_clients: usize,
}

impl RoleCounts {
    pub fn from_roster(roster: &Roster) -> Self {
        let mut counts = Self::default();
        for member in roster.members() {
            counts.total += 1;
            match member.role() {
                Role::Admin => counts.admins += 1,
                Role::Coordinator => counts.coordinators += 1,
                Role::Professional => counts.professionals += 1,
                Role::Client => {
                    counts.clients += 1;
                    if member.user().status.is_active() {
                        counts.active_clients += 1;
                    }
                }
            }
        }
        counts
    }
}

/// Percentage of started program weeks that clients have completed.
pub fn completion_rate(roster: &Roster) -> f64 {
    let (completed, reached) = roster.clients().fold((0usize, 0usize), |(c, r), client| {
        (
            c + client.progress.completed_weeks(),
            r + usize::from(client.current_week.number()),
        )
    });
    if reached == 0 {
        return 0.0;
    }
    completed as f64 * 100.0 / reached as f64
}
