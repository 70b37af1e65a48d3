use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the four fixed program weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ProgramWeek(u8);

impl ProgramWeek {
    pub const COUNT: u8 = 4;

    pub const ALL: [ProgramWeek; 4] = [
        ProgramWeek(1),
        ProgramWeek(2),
        ProgramWeek(3),
        ProgramWeek(4),
    ];

    pub const FIRST: ProgramWeek = ProgramWeek(1);

    pub fn number(self) -> u8 {
        self.0
    }

    /// Zero-based position, for indexing per-week arrays.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<u8> for ProgramWeek {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=Self::COUNT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidWeek(value))
        }
    }
}

impl From<ProgramWeek> for u8 {
    fn from(week: ProgramWeek) -> Self {
        week.0
    }
}

impl fmt::Display for ProgramWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekProgress {
    pub is_locked: bool,
    pub is_completed: bool,
    pub guide_completed: bool,
    /// Minutes of program audio listened during the week.
    pub audio_listened: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_test_done: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_attended: Option<bool>,
}

impl WeekProgress {
    pub fn locked() -> Self {
        Self {
            is_locked: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub week1: WeekProgress,
    pub week2: WeekProgress,
    pub week3: WeekProgress,
    pub week4: WeekProgress,
}

impl Progress {
    /// Fresh progress for a client starting at `current`: earlier weeks and
    /// the current one unlocked, later weeks locked.
    pub fn starting_at(current: ProgramWeek) -> Self {
        let week = |w: u8| {
            if w <= current.number() {
                WeekProgress::default()
            } else {
                WeekProgress::locked()
            }
        };
        Self {
            week1: week(1),
            week2: week(2),
            week3: week(3),
            week4: week(4),
        }
    }

    pub fn get(&self, week: ProgramWeek) -> &WeekProgress {
        match week.number() {
            1 => &self.week1,
            2 => &self.week2,
            3 => &self.week3,
            _ => &self.week4,
        }
    }

    pub fn get_mut(&mut self, week: ProgramWeek) -> &mut WeekProgress {
        match week.number() {
            1 => &mut self.week1,
            2 => &mut self.week2,
            3 => &mut self.week3,
            _ => &mut self.week4,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProgramWeek, &WeekProgress)> {
        ProgramWeek::ALL.into_iter().map(move |w| (w, self.get(w)))
    }

    pub fn completed_weeks(&self) -> usize {
        self.iter().filter(|(_, p)| p.is_completed).count()
    }
}
