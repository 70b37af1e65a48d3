//! Locale-aware date labels.

use jiff::civil::{Date, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub fn parse(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next().unwrap_or(tag);
        match primary.to_ascii_lowercase().as_str() {
            "es" => Some(Locale::Es),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    pub fn weekday_name(self, weekday: Weekday) -> &'static str {
        let idx = weekday.to_monday_zero_offset() as usize;
        match self {
            Locale::Es => [
                "lunes",
                "martes",
                "miércoles",
                "jueves",
                "viernes",
                "sábado",
                "domingo",
            ][idx],
            Locale::En => [
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday",
            ][idx],
        }
    }

    /// Three-letter weekday label used on chart axes and calendar headers.
    pub fn weekday_short(self, weekday: Weekday) -> &'static str {
        let idx = weekday.to_monday_zero_offset() as usize;
        match self {
            Locale::Es => ["Lun", "Mar", "Mié", "Jue", "Vie", "Sáb", "Dom"][idx],
            Locale::En => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"][idx],
        }
    }

    pub fn month_name(self, month: i8) -> &'static str {
        let idx = (month.clamp(1, 12) - 1) as usize;
        match self {
            Locale::Es => [
                "enero",
                "febrero",
                "marzo",
                "abril",
                "mayo",
                "junio",
                "julio",
                "agosto",
                "septiembre",
                "octubre",
                "noviembre",
                "diciembre",
            ][idx],
            Locale::En => [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ][idx],
        }
    }

    /// Long "weekday, day month" label with the first letter capitalized.
    pub fn long_date(self, date: Date) -> String {
        let weekday = self.weekday_name(date.weekday());
        let month = self.month_name(date.month());
        let label = match self {
            Locale::Es => format!("{weekday}, {} de {month}", date.day()),
            Locale::En => format!("{weekday}, {month} {}", date.day()),
        };
        capitalize_first(&label)
    }

    pub fn month_title(self, year: i16, month: i8) -> String {
        capitalize_first(&format!("{} {year}", self.month_name(month)))
    }
}

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
