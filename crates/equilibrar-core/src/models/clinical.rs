use serde::{Deserialize, Serialize};

use super::progress::ProgramWeek;

/// The four dimensions measured by the weekly guilt test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GuiltDimension {
    Autojuicio,
    CulpaNoAdaptativa,
    ResponsabilidadConsciente,
    HumanizacionError,
}

impl GuiltDimension {
    pub const ALL: [GuiltDimension; 4] = [
        GuiltDimension::Autojuicio,
        GuiltDimension::CulpaNoAdaptativa,
        GuiltDimension::ResponsabilidadConsciente,
        GuiltDimension::HumanizacionError,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GuiltDimension::Autojuicio => "Autojuicio",
            GuiltDimension::CulpaNoAdaptativa => "Culpa no adaptativa",
            GuiltDimension::ResponsabilidadConsciente => "Responsabilidad consciente",
            GuiltDimension::HumanizacionError => "Humanización del error",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuiltScores {
    pub autojuicio: u32,
    pub culpa_no_adaptativa: u32,
    pub responsabilidad_consciente: u32,
    pub humanizacion_error: u32,
}

impl GuiltScores {
    pub fn get(&self, dimension: GuiltDimension) -> u32 {
        match dimension {
            GuiltDimension::Autojuicio => self.autojuicio,
            GuiltDimension::CulpaNoAdaptativa => self.culpa_no_adaptativa,
            GuiltDimension::ResponsabilidadConsciente => self.responsabilidad_consciente,
            GuiltDimension::HumanizacionError => self.humanizacion_error,
        }
    }

    pub fn add(&mut self, dimension: GuiltDimension, value: u32) {
        let slot = match dimension {
            GuiltDimension::Autojuicio => &mut self.autojuicio,
            GuiltDimension::CulpaNoAdaptativa => &mut self.culpa_no_adaptativa,
            GuiltDimension::ResponsabilidadConsciente => &mut self.responsabilidad_consciente,
            GuiltDimension::HumanizacionError => &mut self.humanizacion_error,
        };
        *slot += value;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestScore {
    pub date: jiff::civil::Date,
    pub week: ProgramWeek,
    pub scores: GuiltScores,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioUsage {
    pub date: jiff::civil::Date,
    pub minutes_listened: u32,
    pub audio_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalData {
    pub test_scores: Vec<TestScore>,
    pub audio_usage: Vec<AudioUsage>,
}

impl ClinicalData {
    pub fn latest_score(&self) -> Option<&TestScore> {
        self.test_scores.iter().max_by_key(|s| (s.week, s.date))
    }
}
