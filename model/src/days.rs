use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Which day of the week a procession happens on. Holy week starts on Palm Sunday and ends on
/// (Easter) Sunday, so there are two different Sundays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayCategory {
    #[serde(rename = "Palm Sunday")]
    PalmSunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayCategory {
    pub fn all() -> [DayCategory; 8] {
        [
            DayCategory::PalmSunday,
            DayCategory::Monday,
            DayCategory::Tuesday,
            DayCategory::Wednesday,
            DayCategory::Thursday,
            DayCategory::Friday,
            DayCategory::Saturday,
            DayCategory::Sunday,
        ]
    }

    /// The label used by the dataset and the filter buttons
    pub fn label(self) -> &'static str {
        match self {
            DayCategory::PalmSunday => "Palm Sunday",
            DayCategory::Monday => "Monday",
            DayCategory::Tuesday => "Tuesday",
            DayCategory::Wednesday => "Wednesday",
            DayCategory::Thursday => "Thursday",
            DayCategory::Friday => "Friday",
            DayCategory::Saturday => "Saturday",
            DayCategory::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for DayCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        DayCategory::all()
            .into_iter()
            .find(|day| day.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownDayCategory(s.to_string()))
    }
}

/// Which days are switched on. Days never toggled are off.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DayFilter {
    active: BTreeMap<DayCategory, bool>,
}

impl DayFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, day: DayCategory) -> bool {
        self.active.get(&day).copied().unwrap_or(false)
    }

    /// Returns the new state of the day
    pub fn toggle(&mut self, day: DayCategory) -> bool {
        let entry = self.active.entry(day).or_insert(false);
        *entry = !*entry;
        *entry
    }

    pub fn active_days(&self) -> Vec<DayCategory> {
        self.active
            .iter()
            .filter(|(_, on)| **on)
            .map(|(day, _)| *day)
            .collect()
    }

    pub fn describe(&self) -> String {
        let days = self.active_days();
        if days.is_empty() {
            return "no days".to_string();
        }
        if days.len() == DayCategory::all().len() {
            return "every day".to_string();
        }
        days.into_iter()
            .map(|day| day.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Palm Sunday", DayCategory::PalmSunday)]
    #[case("Monday", DayCategory::Monday)]
    #[case("friday", DayCategory::Friday)]
    #[case(" Sunday ", DayCategory::Sunday)]
    fn parses_labels(#[case] label: &str, #[case] expected: DayCategory) {
        assert_eq!(label.parse::<DayCategory>().unwrap(), expected);
    }

    #[test]
    fn unknown_label() {
        assert_eq!(
            "Easter".parse::<DayCategory>(),
            Err(Error::UnknownDayCategory("Easter".to_string()))
        );
    }

    #[test]
    fn labels_round_trip() {
        for day in DayCategory::all() {
            assert_eq!(day.label().parse::<DayCategory>().unwrap(), day);
        }
    }

    #[test]
    fn toggling() {
        let mut filter = DayFilter::new();
        assert!(!filter.is_active(DayCategory::Thursday));
        assert_eq!(filter.describe(), "no days");

        assert!(filter.toggle(DayCategory::Thursday));
        assert!(filter.is_active(DayCategory::Thursday));
        assert!(!filter.is_active(DayCategory::Friday));
        assert_eq!(filter.describe(), "Thursday");

        assert!(!filter.toggle(DayCategory::Thursday));
        assert!(!filter.is_active(DayCategory::Thursday));
        assert!(filter.active_days().is_empty());

        for day in DayCategory::all() {
            filter.toggle(day);
        }
        assert_eq!(filter.describe(), "every day");
    }
}
