//! Program meeting dates and the coordinator's month calendar.

use jiff::civil::{Date, DateTime, Time, Weekday};
use jiff::tz::TimeZone;
use jiff::{Span, Timestamp};
use serde::Serialize;

use crate::error::CoreError;
use crate::locale::Locale;
use crate::models::client::ClientProfile;
use crate::models::progress::ProgramWeek;

/// Program meetings always start at this local hour.
pub const MEETING_HOUR: i8 = 10;

/// Days between the start of a program week and its meeting.
pub const MEETING_DAY_OFFSET: i64 = 2;

const WEEK_DAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextMeeting {
    pub week: ProgramWeek,
    pub starts_at: DateTime,
    /// Localized "Weekday, day month" label.
    pub formatted: String,
    pub is_past: bool,
}

pub fn meeting_date(start_date: Date, week: ProgramWeek) -> Result<Date, CoreError> {
    let offset = i64::from(week.number() - 1) * 7 + MEETING_DAY_OFFSET;
    Ok(start_date.checked_add(Span::new().days(offset))?)
}

/// Meeting for `week` of a program started on `start_date`: `(week - 1) * 7 + 2`
/// days later at 10:00 in `tz`, classified against the injected `now`.
pub fn compute_next_meeting(
    start_date: Date,
    week: ProgramWeek,
    now: Timestamp,
    tz: &TimeZone,
    locale: Locale,
) -> Result<NextMeeting, CoreError> {
    let date = meeting_date(start_date, week)?;
    let starts_at = date.at(MEETING_HOUR, 0, 0, 0);
    let is_past = starts_at.to_zoned(tz.clone())?.timestamp() < now;

    Ok(NextMeeting {
        week,
        starts_at,
        formatted: locale.long_date(date),
        is_past,
    })
}

/// Meeting for the client's current program week.
pub fn client_meeting(
    client: &ClientProfile,
    now: Timestamp,
    tz: &TimeZone,
    locale: Locale,
) -> Result<NextMeeting, CoreError> {
    compute_next_meeting(client.start_date, client.current_week, now, tz, locale)
}

/// Label for an explicitly scheduled session, or the "not scheduled"
/// placeholder when none is set.
pub fn session_label(session: Option<DateTime>, locale: Locale) -> String {
    match session {
        Some(at) => format!(
            "{} · {:02}:{:02}",
            locale.long_date(at.date()),
            at.hour(),
            at.minute()
        ),
        None => match locale {
            Locale::Es => "Sin agendar".to_string(),
            Locale::En => "Not scheduled".to_string(),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    pub date: Date,
    pub time: Time,
    pub label: String,
}

impl CalendarEvent {
    pub fn time_label(&self) -> String {
        format!("{:02}:{:02}", self.time.hour(), self.time.minute())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEntry {
    pub time: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub day: i8,
    pub is_today: bool,
    pub entries: Vec<CalendarEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    pub title: String,
    pub weekdays: Vec<&'static str>,
    /// Empty cells before day 1 in a Monday-first grid.
    pub leading_blanks: usize,
    pub days: Vec<CalendarDay>,
}

pub fn month_grid(
    year: i16,
    month: i8,
    today: Option<Date>,
    events: &[CalendarEvent],
    locale: Locale,
) -> Result<MonthGrid, CoreError> {
    let first = Date::new(year, month, 1)?;
    let leading_blanks = first.weekday().to_monday_zero_offset() as usize;

    let mut days = Vec::with_capacity(first.days_in_month() as usize);
    for day in 1..=first.days_in_month() {
        let date = Date::new(year, month, day)?;
        let mut todays: Vec<&CalendarEvent> = events.iter().filter(|e| e.date == date).collect();
        todays.sort_by(|a, b| a.time.cmp(&b.time).then_with(|| a.label.cmp(&b.label)));

        days.push(CalendarDay {
            day,
            is_today: today == Some(date),
            entries: todays
                .into_iter()
                .map(|e| CalendarEntry {
                    time: e.time_label(),
                    label: e.label.clone(),
                })
                .collect(),
        });
    }

    Ok(MonthGrid {
        title: locale.month_title(year, month),
        weekdays: WEEK_DAYS.iter().map(|w| locale.weekday_short(*w)).collect(),
        leading_blanks,
        days,
    })
}

/// Calendar events for a set of clients: each scheduled session, plus the
/// program meeting of the current week when that week has one.
pub fn client_events<'a>(
    clients: impl IntoIterator<Item = &'a ClientProfile>,
    has_meet: impl Fn(ProgramWeek) -> bool,
) -> Result<Vec<CalendarEvent>, CoreError> {
    let mut events = Vec::new();
    for client in clients {
        let short = short_name(&client.user.name);
        if let Some(at) = client.next_session {
            events.push(CalendarEvent {
                date: at.date(),
                time: at.time(),
                label: short.clone(),
            });
        }
        if has_meet(client.current_week) {
            events.push(CalendarEvent {
                date: meeting_date(client.start_date, client.current_week)?,
                time: jiff::civil::time(MEETING_HOUR, 0, 0, 0),
                label: short,
            });
        }
    }
    Ok(events)
}

/// "Lucía Fernández (Sem 1)" -> "Lucía F."
pub fn short_name(name: &str) -> String {
    let mut words = name.split_whitespace().filter(|w| !w.starts_with('('));
    match (words.next(), words.next()) {
        (Some(first), Some(last)) => match last.chars().next() {
            Some(initial) => format!("{first} {initial}."),
            None => first.to_string(),
        },
        (Some(first), None) => first.to_string(),
        _ => String::new(),
    }
}
