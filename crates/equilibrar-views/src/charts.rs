//! Numeric series shaped for the HTML bar charts.

use serde::Serialize;

use equilibrar_core::metrics::DailyMinutes;
use equilibrar_core::models::clinical::{GuiltDimension, TestScore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: u32,
    /// Height relative to the tallest bar of the chart, 0–100.
    pub percent: u32,
}

pub fn bars<L: Into<String>>(points: impl IntoIterator<Item = (L, u32)>) -> Vec<Bar> {
    let points: Vec<(String, u32)> = points.into_iter().map(|(l, v)| (l.into(), v)).collect();
    let max = points.iter().map(|(_, v)| *v).max().unwrap_or(0);
    points
        .into_iter()
        .map(|(label, value)| Bar {
            label,
            value,
            percent: if max == 0 { 0 } else { value * 100 / max },
        })
        .collect()
}

pub fn minutes_chart(series: &[DailyMinutes]) -> Vec<Bar> {
    bars(series.iter().map(|d| (d.day, d.minutes)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreSeries {
    pub dimension: &'static str,
    pub bars: Vec<Bar>,
}

/// One series per guilt dimension, one bar per recorded week. Bars share a
/// single scale so dimensions can be compared.
pub fn score_history(scores: &[TestScore]) -> Vec<ScoreSeries> {
    let mut ordered: Vec<&TestScore> = scores.iter().collect();
    ordered.sort_by_key(|s| (s.week, s.date));
    let max = ordered
        .iter()
        .flat_map(|s| GuiltDimension::ALL.map(|d| s.scores.get(d)))
        .max()
        .unwrap_or(0);

    GuiltDimension::ALL
        .into_iter()
        .map(|dimension| ScoreSeries {
            dimension: dimension.label(),
            bars: ordered
                .iter()
                .map(|s| {
                    let value = s.scores.get(dimension);
                    Bar {
                        label: format!("Sem {}", s.week),
                        value,
                        percent: if max == 0 { 0 } else { value * 100 / max },
                    }
                })
                .collect(),
        })
        .collect()
}
