//! The fixed demo dataset the dashboard is built from.

use jiff::civil::{date, datetime};
use serde::Serialize;

use crate::models::client::ClientProfile;
use crate::models::clinical::{AudioUsage, ClinicalData, GuiltScores, TestScore};
use crate::models::progress::{ProgramWeek, Progress, WeekProgress};
use crate::models::roster::{Member, Roster};
use crate::models::user::{AccountStatus, Role, User, UserId};

pub const ADMIN_ID: &str = "u-admin";
pub const COORDINATOR_ID: &str = "u-coord";
pub const PROFESSIONAL_ID: &str = "u-prof";

pub fn avatar_url(seed: u32) -> String {
    format!("https://picsum.photos/200/200?random={seed}")
}

fn week(n: u8) -> ProgramWeek {
    ProgramWeek::ALL[usize::from(n - 1)]
}

fn user(id: &str, name: &str, email: &str, role: Role, avatar_seed: u32) -> User {
    User {
        id: UserId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        role,
        avatar: avatar_url(avatar_seed),
        status: AccountStatus::Active,
    }
}

fn done(audio: u32, initial_test: bool) -> WeekProgress {
    WeekProgress {
        is_locked: false,
        is_completed: true,
        guide_completed: true,
        audio_listened: audio,
        initial_test_done: Some(initial_test),
        meeting_attended: None,
    }
}

fn scores(a: u32, c: u32, r: u32, h: u32) -> GuiltScores {
    GuiltScores {
        autojuicio: a,
        culpa_no_adaptativa: c,
        responsabilidad_consciente: r,
        humanizacion_error: h,
    }
}

fn audio(y: i16, m: i8, d: i8, minutes: u32, id: &str) -> AudioUsage {
    AudioUsage {
        date: date(y, m, d),
        minutes_listened: minutes,
        audio_id: id.to_string(),
    }
}

pub fn admin() -> User {
    user(ADMIN_ID, "Claudio Reyes", "admin@equilibrar.cl", Role::Admin, 1)
}

pub fn coordinator() -> User {
    user(
        COORDINATOR_ID,
        "María Coordinadora",
        "coord@equilibrar.cl",
        Role::Coordinator,
        2,
    )
}

pub fn professional() -> User {
    user(
        PROFESSIONAL_ID,
        "Dr. Especialista",
        "prof@equilibrar.cl",
        Role::Professional,
        3,
    )
}

pub fn client_week1() -> ClientProfile {
    let mut progress = Progress::starting_at(week(1));
    progress.week1.initial_test_done = Some(false);
    progress.week1.meeting_attended = Some(false);

    ClientProfile {
        user: user("c-w1", "Lucía Fernández (Sem 1)", "lucia@client.com", Role::Client, 4),
        current_week: week(1),
        start_date: date(2023, 10, 25),
        next_session: Some(datetime(2023, 10, 28, 10, 0, 0, 0)),
        progress,
        clinical_data: ClinicalData::default(),
    }
}

pub fn client_week2() -> ClientProfile {
    let mut progress = Progress::starting_at(week(2));
    progress.week1 = WeekProgress {
        meeting_attended: Some(true),
        ..done(6, true)
    };

    ClientProfile {
        user: user("c-w2", "Carlos Díaz (Sem 2)", "carlos@client.com", Role::Client, 6),
        current_week: week(2),
        start_date: date(2023, 10, 18),
        next_session: None,
        progress,
        clinical_data: ClinicalData {
            test_scores: vec![TestScore {
                date: date(2023, 10, 18),
                week: week(1),
                scores: scores(24, 20, 12, 5),
            }],
            audio_usage: vec![audio(2023, 10, 19, 15, "audio1")],
        },
    }
}

pub fn client_week3() -> ClientProfile {
    let mut progress = Progress::starting_at(week(3));
    progress.week1 = WeekProgress {
        meeting_attended: Some(true),
        ..done(5, true)
    };
    progress.week2 = done(4, true);
    progress.week3.initial_test_done = Some(false);
    progress.week3.audio_listened = 1;

    ClientProfile {
        user: user("c-w3", "Pedro Pascal (Sem 3)", "pedro@client.com", Role::Client, 5),
        current_week: week(3),
        start_date: date(2023, 10, 1),
        next_session: None,
        progress,
        clinical_data: ClinicalData {
            test_scores: vec![
                TestScore {
                    date: date(2023, 10, 1),
                    week: week(1),
                    scores: scores(25, 22, 10, 3),
                },
                TestScore {
                    date: date(2023, 10, 15),
                    week: week(2),
                    scores: scores(18, 15, 18, 6),
                },
            ],
            audio_usage: vec![
                audio(2023, 10, 2, 15, "audio1"),
                audio(2023, 10, 3, 15, "audio1"),
                audio(2023, 10, 16, 20, "audio2"),
            ],
        },
    }
}

pub fn client_week4() -> ClientProfile {
    let mut progress = Progress::starting_at(week(4));
    progress.week1 = WeekProgress {
        meeting_attended: Some(true),
        ..done(7, true)
    };
    progress.week2 = done(5, true);
    progress.week3 = done(6, true);
    progress.week4.meeting_attended = Some(false);

    ClientProfile {
        user: user("c-w4", "Ana Ruiz (Sem 4)", "ana@client.com", Role::Client, 7),
        current_week: week(4),
        start_date: date(2023, 9, 20),
        next_session: Some(datetime(2023, 10, 30, 16, 0, 0, 0)),
        progress,
        clinical_data: ClinicalData {
            test_scores: vec![
                TestScore {
                    date: date(2023, 9, 20),
                    week: week(1),
                    scores: scores(28, 24, 8, 2),
                },
                TestScore {
                    date: date(2023, 10, 4),
                    week: week(2),
                    scores: scores(20, 18, 15, 5),
                },
                TestScore {
                    date: date(2023, 10, 18),
                    week: week(3),
                    scores: scores(14, 10, 22, 8),
                },
            ],
            audio_usage: Vec::new(),
        },
    }
}

/// Every fixture user, staff first, clients ordered by program week.
pub fn roster() -> Roster {
    Roster::new(vec![
        Member::Staff(admin()),
        Member::Staff(coordinator()),
        Member::Staff(professional()),
        Member::Client(client_week1()),
        Member::Client(client_week2()),
        Member::Client(client_week3()),
        Member::Client(client_week4()),
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    UserCreated,
    ClientDeactivated,
    Backup,
    Settings,
}

/// An entry of the admin overview's activity feed.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub title: &'static str,
    pub detail: &'static str,
    pub time_label: &'static str,
}

pub fn activity_log() -> Vec<ActivityEntry> {
    vec![
        ActivityEntry {
            kind: ActivityKind::UserCreated,
            title: "Nuevo Profesional",
            detail: "Admin creó perfil para Dr. Alvarez",
            time_label: "10:42 AM",
        },
        ActivityEntry {
            kind: ActivityKind::ClientDeactivated,
            title: "Cliente Desactivado",
            detail: "Coordinador suspendió cuenta #9928",
            time_label: "10:15 AM",
        },
        ActivityEntry {
            kind: ActivityKind::Backup,
            title: "Backup MySQL",
            detail: "Sistema completó respaldo automático.",
            time_label: "09:30 AM",
        },
        ActivityEntry {
            kind: ActivityKind::Settings,
            title: "Configuración RFAI",
            detail: "Admin actualizó parámetros del módulo 2.",
            time_label: "Ayer",
        },
    ]
}
