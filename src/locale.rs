//! Fixed Spanish (es-ES) labels for months and weekdays.

use chrono::{Datelike, Month, NaiveDate, Weekday};

use crate::provider::MonthIndex;

pub const WEEKDAY_HEADER: [&str; 7] = ["Lun", "Mar", "Mié", "Jue", "Vie", "Sáb", "Dom"];

pub fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "enero",
        Month::February => "febrero",
        Month::March => "marzo",
        Month::April => "abril",
        Month::May => "mayo",
        Month::June => "junio",
        Month::July => "julio",
        Month::August => "agosto",
        Month::September => "septiembre",
        Month::October => "octubre",
        Month::November => "noviembre",
        Month::December => "diciembre",
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// "marzo de 2024"
pub fn month_label(month: &MonthIndex) -> String {
    format!("{} de {}", month_name(month.month()), month.year())
}

/// "viernes, 15 de marzo de 2024"
pub fn long_date(date: &NaiveDate) -> String {
    format!(
        "{}, {} de {}",
        weekday_name(date.weekday()),
        date.day(),
        month_label(&MonthIndex::from(date))
    )
}
