use crate::constants::ALL_SELECTION;
use crate::types::Show;
use serde::Serialize;
use std::fmt;

/// One facet selection: everything, or one exact value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// `"all"` and blank input select everything
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_SELECTION {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }

    pub fn from_option(value: Option<&str>) -> Self {
        value.map(Selection::parse).unwrap_or_default()
    }

    fn admits(&self, candidate: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => candidate == Some(wanted.as_str()),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL_SELECTION),
            Selection::Only(v) => f.write_str(v),
        }
    }
}

impl Serialize for Selection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The user's current month and city choice
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterSelection {
    pub month: Selection,
    pub city: Selection,
}

impl FilterSelection {
    pub fn new(month: Selection, city: Selection) -> Self {
        Self { month, city }
    }

    pub fn is_reset(&self) -> bool {
        self.month == Selection::All && self.city == Selection::All
    }

    /// Month and city must both admit the show. A specific month never
    /// admits a show without a parsable instant; city matches are exact.
    pub fn matches(&self, show: &Show) -> bool {
        let month_key = show.month_key();
        self.month.admits(month_key.as_deref()) && self.city.admits(Some(show.city.as_str()))
    }
}

pub fn apply_filters(shows: &[Show], selection: &FilterSelection) -> Vec<Show> {
    shows
        .iter()
        .filter(|s| selection.matches(s))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::dates::parse_instant;
    use crate::types::Performer;

    fn show(date: &str, time: Option<&str>, city: &str) -> Show {
        Show {
            performer: Performer::Pat,
            date: date.to_string(),
            time: time.map(str::to_string),
            city: city.to_string(),
            venue: "Show".to_string(),
            ticket_url: None,
            status: String::new(),
            sold_out: false,
            starts_at: parse_instant(date, time),
        }
    }

    fn mixed() -> Vec<Show> {
        vec![
            show("2025-10-31", Some("8:00 PM"), "Reston"),
            show("2025-11-05", Some("7:30 PM"), "Reston"),
            show("2025-11-20", Some("9:00 PM"), "Arlington"),
            show("2025-11-21", None, "Reston"),
            show("2025-12-01", Some("7:00 PM"), "Arlington"),
        ]
    }

    #[test]
    fn test_all_all_passes_everything() {
        let out = apply_filters(&mixed(), &FilterSelection::default());
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn test_month_filter_excludes_unparsable() {
        let sel = FilterSelection::new(Selection::parse("2025-11"), Selection::All);
        let out = apply_filters(&mixed(), &sel);
        let dates: Vec<_> = out.iter().map(|s| s.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-11-05", "2025-11-20"]);
    }

    #[test]
    fn test_city_filter_is_exact_and_case_sensitive() {
        let sel = FilterSelection::new(Selection::All, Selection::parse("Reston"));
        assert_eq!(apply_filters(&mixed(), &sel).len(), 3);

        let sel = FilterSelection::new(Selection::All, Selection::parse("reston"));
        assert!(apply_filters(&mixed(), &sel).is_empty());
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let sel = FilterSelection::new(Selection::parse("2025-11"), Selection::parse("Arlington"));
        let out = apply_filters(&mixed(), &sel);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date, "2025-11-20");
    }

    #[test]
    fn test_selection_parse_sentinel() {
        assert_eq!(Selection::parse("all"), Selection::All);
        assert_eq!(Selection::parse("  "), Selection::All);
        assert_eq!(Selection::from_option(None), Selection::All);
        assert_eq!(Selection::parse("2025-11").to_string(), "2025-11");
        assert!(FilterSelection::default().is_reset());
    }
}
