use chrono::{Datelike, Local};
use log::debug;
use web_sys::Document;

/// Slots that show the day of the month.
pub const DAY_SLOTS: [&str; 3] = ["heroDate", "dateCounter", "navbarDate"];
/// Slots that show the two-digit year.
pub const YEAR_SLOTS: [&str; 1] = ["navbarYear"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateStamp {
    pub day: String,
    pub year: String,
}

impl DateStamp {
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            day: format!("{:02}", date.day()),
            year: format!("{:02}", date.year().rem_euclid(100)),
        }
    }

    pub fn today() -> Self {
        Self::from_date(&Local::now())
    }
}

/// Writes `stamp` into whichever date slots the page has. Returns how many
/// slots were filled.
pub fn fill_date_slots(document: &Document, stamp: &DateStamp) -> usize {
    let days = DAY_SLOTS.iter().map(|id| (id, stamp.day.as_str()));
    let years = YEAR_SLOTS.iter().map(|id| (id, stamp.year.as_str()));

    let mut filled = 0;
    for (id, text) in days.chain(years) {
        if let Some(slot) = document.get_element_by_id(id) {
            slot.set_text_content(Some(text));
            filled += 1;
        }
    }
    filled
}

pub fn show_today(document: &Document) {
    let stamp = DateStamp::today();
    let filled = fill_date_slots(document, &stamp);
    debug!("date {}/{} written to {} slots", stamp.day, stamp.year, filled);
}
