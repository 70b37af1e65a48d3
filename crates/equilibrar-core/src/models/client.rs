use serde::{Deserialize, Serialize};

use crate::error::CoreError;

use super::clinical::ClinicalData;
use super::progress::{ProgramWeek, Progress};
use super::user::{Role, User};

/// A user enrolled in the four-week program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    #[serde(flatten)]
    pub user: User,
    pub current_week: ProgramWeek,
    pub start_date: jiff::civil::Date,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_session: Option<jiff::civil::DateTime>,
    pub progress: Progress,
    pub clinical_data: ClinicalData,
}

impl ClientProfile {
    /// Check the progress invariants: weeks before the current one are
    /// unlocked, the current week is unlocked, later weeks are locked, and a
    /// completed week has its guide completed.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.user.role != Role::Client {
            return Err(CoreError::ClientRole(self.user.id.to_string()));
        }

        for (week, progress) in self.progress.iter() {
            let reason = if week <= self.current_week && progress.is_locked {
                Some("is reachable but locked")
            } else if week > self.current_week && !progress.is_locked {
                Some("is ahead of the current week but unlocked")
            } else if progress.is_completed && !progress.guide_completed {
                Some("is completed without its guide")
            } else {
                None
            };

            if let Some(reason) = reason {
                return Err(CoreError::ProgressInvariant {
                    client_id: self.user.id.to_string(),
                    week,
                    reason,
                });
            }
        }
        Ok(())
    }
}
