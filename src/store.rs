use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;

use crate::provider::{DateKey, MonthIndex};

/// Ordered, trimmed, non-empty activity lines of a single day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityList(Vec<String>);

impl ActivityList {
    /// Splits `raw` on line breaks, trims every line and drops blank ones.
    pub fn from_text(raw: &str) -> Self {
        ActivityList(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// The text shown when the day is edited again.
    pub fn to_text(&self) -> String {
        self.0.join("\n")
    }
}

impl fmt::Display for ActivityList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl<'a> IntoIterator for &'a ActivityList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// In-memory activities of the running session, keyed by day.
#[derive(Debug, Default)]
pub struct ActivityStore {
    activities: HashMap<DateKey, ActivityList>,
    empty: ActivityList,
}

impl ActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: &NaiveDate) -> &ActivityList {
        self.activities
            .get(&DateKey::from(date))
            .unwrap_or(&self.empty)
    }

    /// Replaces the activities of `date` with the normalized lines of `raw_text`.
    /// An empty result removes the day.
    pub fn save(&mut self, date: &NaiveDate, raw_text: &str) -> &ActivityList {
        let key = DateKey::from(date);
        let entries = ActivityList::from_text(raw_text);

        if entries.is_empty() {
            if self.activities.remove(&key).is_some() {
                log::debug!("Cleared activities of {}", key);
            }
            &self.empty
        } else {
            log::debug!("Stored {} activities for {}", entries.len(), key);
            self.activities.insert(key.clone(), entries);
            &self.activities[&key]
        }
    }

    pub fn has_activities(&self, date: &NaiveDate) -> bool {
        !self.get(date).is_empty()
    }

    /// Days of `month` that carry activities, in calendar order.
    pub fn activities_in<'a>(
        &'a self,
        month: &'a MonthIndex,
    ) -> impl Iterator<Item = (NaiveDate, &'a ActivityList)> + 'a {
        month
            .days()
            .map(move |day| (day, self.get(&day)))
            .filter(|(_, list)| !list.is_empty())
    }

    /// Number of days with activities.
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}
