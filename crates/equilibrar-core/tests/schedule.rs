use equilibrar_core::content::week_content;
use equilibrar_core::fixtures;
use equilibrar_core::locale::Locale;
use equilibrar_core::models::progress::ProgramWeek;
use equilibrar_core::schedule::{
    client_events, compute_next_meeting, month_grid, session_label, short_name, MEETING_HOUR,
};
use jiff::civil::{date, datetime};
use jiff::tz::TimeZone;
use jiff::Timestamp;

fn ts(s: &str) -> Timestamp {
    s.parse().unwrap()
}

fn week(n: u8) -> ProgramWeek {
    ProgramWeek::try_from(n).unwrap()
}

#[test]
fn first_week_meeting_is_friday_at_ten() {
    let meeting = compute_next_meeting(
        date(2023, 10, 25),
        week(1),
        ts("2023-10-01T00:00:00Z"),
        &TimeZone::UTC,
        Locale::Es,
    )
    .unwrap();

    assert_eq!(meeting.starts_at, datetime(2023, 10, 27, 10, 0, 0, 0));
    assert_eq!(meeting.formatted, "Viernes, 27 de octubre");
    assert!(!meeting.is_past);
}

#[test]
fn meeting_offset_holds_for_every_week() {
    let start = date(2023, 9, 20);
    for w in ProgramWeek::ALL {
        let meeting = compute_next_meeting(
            start,
            w,
            ts("2023-01-01T00:00:00Z"),
            &TimeZone::UTC,
            Locale::Es,
        )
        .unwrap();
        let days = start.until(meeting.starts_at.date()).unwrap().get_days();
        assert_eq!(days, i32::from(w.number() - 1) * 7 + 2);
        assert_eq!(meeting.starts_at.hour(), MEETING_HOUR);
        assert_eq!(meeting.starts_at.minute(), 0);
    }
}

#[test]
fn is_past_only_when_strictly_before_now() {
    let at = |now: &str| {
        compute_next_meeting(
            date(2023, 10, 25),
            week(1),
            ts(now),
            &TimeZone::UTC,
            Locale::Es,
        )
        .unwrap()
        .is_past
    };

    assert!(!at("2023-10-27T09:59:59Z"));
    assert!(!at("2023-10-27T10:00:00Z"));
    assert!(at("2023-10-27T10:00:01Z"));
}

#[test]
fn time_zone_shifts_the_past_boundary() {
    // 10:00 at UTC-3 is 13:00 UTC.
    let tz = TimeZone::fixed(jiff::tz::offset(-3));
    let meeting = compute_next_meeting(
        date(2023, 10, 25),
        week(1),
        ts("2023-10-27T12:30:00Z"),
        &tz,
        Locale::Es,
    )
    .unwrap();
    assert!(!meeting.is_past);
}

#[test]
fn computation_is_idempotent() {
    let run = || {
        compute_next_meeting(
            date(2023, 10, 1),
            week(3),
            ts("2023-10-20T00:00:00Z"),
            &TimeZone::UTC,
            Locale::En,
        )
        .unwrap()
    };
    let first = run();
    assert_eq!(first, run());
    assert_eq!(first.formatted, "Tuesday, October 17");
    assert!(first.is_past);
}

#[test]
fn missing_session_renders_placeholder() {
    assert_eq!(session_label(None, Locale::Es), "Sin agendar");
    assert_eq!(session_label(None, Locale::En), "Not scheduled");
    assert_eq!(
        session_label(Some(datetime(2023, 10, 28, 10, 0, 0, 0)), Locale::Es),
        "Sábado, 28 de octubre · 10:00"
    );
}

#[test]
fn october_2023_grid_starts_on_sunday() {
    let grid = month_grid(2023, 10, Some(date(2023, 10, 25)), &[], Locale::Es).unwrap();
    assert_eq!(grid.title, "Octubre 2023");
    assert_eq!(grid.leading_blanks, 6);
    assert_eq!(grid.days.len(), 31);
    assert_eq!(grid.weekdays.first(), Some(&"Lun"));
    assert!(grid.days[24].is_today);
    assert_eq!(grid.days.iter().filter(|d| d.is_today).count(), 1);
}

#[test]
fn fixture_clients_land_on_the_calendar() {
    let roster = fixtures::roster();
    let events = client_events(roster.clients(), |w| week_content(w).has_meet).unwrap();
    let grid = month_grid(2023, 10, None, &events, Locale::Es).unwrap();

    let day = |d: usize| &grid.days[d - 1].entries;
    assert_eq!(day(27).len(), 1);
    assert_eq!(day(27)[0].label, "Lucía F.");
    assert_eq!(day(28)[0].time, "10:00");
    assert_eq!(day(30)[0].time, "16:00");
    assert_eq!(day(30)[0].label, "Ana R.");
    assert_eq!(day(13)[0].label, "Ana R.");
}

#[test]
fn short_name_skips_annotations() {
    assert_eq!(short_name("Carlos Díaz (Sem 2)"), "Carlos D.");
    assert_eq!(short_name("Madonna"), "Madonna");
    assert_eq!(short_name(""), "");
}
