use crate::types::{Performer, Show};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Whether shows dated before today are dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PastShowPolicy {
    HideBeforeToday,
    KeepAll,
}

impl PastShowPolicy {
    pub fn from_hide_flag(hide_past_shows: bool) -> Self {
        if hide_past_shows {
            PastShowPolicy::HideBeforeToday
        } else {
            PastShowPolicy::KeepAll
        }
    }
}

/// Filter and sort one performer's shows.
///
/// Empty dates are always dropped. Under `HideBeforeToday`, a show whose
/// instant falls before local midnight of `today` is dropped; shows without a
/// parsable instant are always kept. Ordering is by instant ascending, with
/// unparsable shows first, and is stable over input order.
pub fn process(shows: Vec<Show>, today: NaiveDate, policy: PastShowPolicy) -> Vec<Show> {
    let cutoff = today.and_hms_opt(0, 0, 0).unwrap_or(NaiveDateTime::MIN);

    let mut kept: Vec<Show> = shows
        .into_iter()
        .filter(|s| !s.date.is_empty())
        .filter(|s| match (policy, s.starts_at) {
            (PastShowPolicy::HideBeforeToday, Some(at)) => at >= cutoff,
            _ => true,
        })
        .collect();

    kept.sort_by_key(|s| s.starts_at.unwrap_or(NaiveDateTime::MIN));
    kept
}

/// Derived filter dimensions across every loaded show
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterFacets {
    /// `YYYY-MM` keys, ascending
    pub months: Vec<String>,
    /// Distinct non-empty cities, alphabetical ignoring case
    pub cities: Vec<String>,
}

fn compare_cities(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn derive_facets<'a, I>(shows: I) -> FilterFacets
where
    I: IntoIterator<Item = &'a Show>,
{
    let mut months = BTreeSet::new();
    let mut cities = BTreeSet::new();
    for show in shows {
        if let Some(key) = show.month_key() {
            months.insert(key);
        }
        if !show.city.is_empty() {
            cities.insert(show.city.clone());
        }
    }

    let mut cities: Vec<String> = cities.into_iter().collect();
    cities.sort_by(|a, b| compare_cities(a, b));

    FilterFacets {
        months: months.into_iter().collect(),
        cities,
    }
}

/// Processed shows for each roster member
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schedule {
    pub members: BTreeMap<Performer, Vec<Show>>,
}

impl Schedule {
    pub fn empty() -> Self {
        Self {
            members: Performer::ALL.into_iter().map(|p| (p, Vec::new())).collect(),
        }
    }

    pub fn shows_for(&self, performer: Performer) -> &[Show] {
        self.members
            .get(&performer)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn all_shows(&self) -> impl Iterator<Item = &Show> {
        self.members.values().flatten()
    }

    pub fn facets(&self) -> FilterFacets {
        derive_facets(self.all_shows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::dates::parse_instant;

    fn show(date: &str, time: Option<&str>, city: &str) -> Show {
        Show {
            performer: Performer::Devin,
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

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 5).unwrap()
    }

    #[test]
    fn test_past_shows_dropped_today_kept() {
        let shows = vec![
            show("2025-11-04", Some("11:59 PM"), "Reston"),
            show("2025-11-05", Some("12:00 AM"), "Reston"),
            show("2025-11-05", Some("9:00 PM"), "Reston"),
        ];
        let out = process(shows, today(), PastShowPolicy::HideBeforeToday);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|s| s.date == "2025-11-05"));
    }

    #[test]
    fn test_unparsable_old_shows_are_kept() {
        let shows = vec![
            show("2020-01-01", None, ""),
            show("01/01/2020 maybe", Some("7:30 PM"), ""),
        ];
        let out = process(shows, today(), PastShowPolicy::HideBeforeToday);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_empty_date_always_dropped() {
        let out = process(vec![show("", Some("7:30 PM"), "")], today(), PastShowPolicy::KeepAll);
        assert!(out.is_empty());
    }

    #[test]
    fn test_keep_all_policy_keeps_past() {
        let out = process(
            vec![show("2024-01-01", Some("7:30 PM"), "")],
            today(),
            PastShowPolicy::KeepAll,
        );
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_sort_ascending_with_unparsable_first_and_stable() {
        let shows = vec![
            show("2025-12-01", Some("8:00 PM"), "T3"),
            show("TBD", None, "U1"),
            show("2025-11-10", Some("8:00 PM"), "T1"),
            show("soon", None, "U2"),
            show("2025-11-20", Some("8:00 PM"), "T2"),
        ];
        let out = process(shows, today(), PastShowPolicy::HideBeforeToday);
        let order: Vec<_> = out.iter().map(|s| s.city.as_str()).collect();
        assert_eq!(order, vec!["U1", "U2", "T1", "T2", "T3"]);
    }

    #[test]
    fn test_facets_months_and_cities() {
        let shows = vec![
            show("2025-12-01", Some("8:00 PM"), "reston"),
            show("2025-11-10", Some("8:00 PM"), "Arlington"),
            show("2025-11-12", Some("8:00 PM"), "Baltimore"),
            show("TBD", None, "Washington, DC"),
            show("2025-11-13", Some("8:00 PM"), ""),
        ];
        let facets = derive_facets(&shows);
        assert_eq!(facets.months, vec!["2025-11", "2025-12"]);
        assert_eq!(facets.cities, vec!["Arlington", "Baltimore", "reston", "Washington, DC"]);
    }

    #[test]
    fn test_empty_schedule_has_every_member() {
        let schedule = Schedule::empty();
        for p in Performer::ALL {
            assert!(schedule.shows_for(p).is_empty());
        }
        assert_eq!(schedule.facets(), FilterFacets::default());
    }
}
