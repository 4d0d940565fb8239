use super::dates::{normalize_date_text, normalize_time_text, parse_instant};
use crate::constants::*;
use crate::types::{Performer, RawRow, Show};
use once_cell::sync::Lazy;
use regex::Regex;

static SOLD_OUT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)sold\s*out").expect("valid regex"));

/// Ordered column labels for one canonical field
#[derive(Debug, Clone, Copy)]
pub struct FieldAliases {
    pub field: &'static str,
    pub labels: &'static [&'static str],
}

impl FieldAliases {
    /// Value of the first label present in the row, trimmed. A present but
    /// empty cell still wins over later labels.
    pub fn resolve<'a>(&self, row: &'a RawRow) -> &'a str {
        self.labels
            .iter()
            .find_map(|label| row.get(*label))
            .map(|v| v.trim())
            .unwrap_or("")
    }

    pub fn is_present(&self, row: &RawRow) -> bool {
        self.labels.iter().any(|label| row.contains_key(*label))
    }
}

pub const DATE: FieldAliases = FieldAliases {
    field: "date",
    labels: DATE_COLUMNS,
};
pub const TIME: FieldAliases = FieldAliases {
    field: "time",
    labels: TIME_COLUMNS,
};
pub const CITY: FieldAliases = FieldAliases {
    field: "city",
    labels: CITY_COLUMNS,
};
pub const VENUE: FieldAliases = FieldAliases {
    field: "venue",
    labels: VENUE_COLUMNS,
};
pub const TICKET: FieldAliases = FieldAliases {
    field: "ticket",
    labels: TICKET_COLUMNS,
};
pub const STATUS: FieldAliases = FieldAliases {
    field: "status",
    labels: STATUS_COLUMNS,
};
pub const MEMBER: FieldAliases = FieldAliases {
    field: "member",
    labels: MEMBER_COLUMNS,
};

/// Every alias list, in field order
pub const SHOW_FIELDS: [FieldAliases; 6] = [DATE, TIME, CITY, VENUE, TICKET, STATUS];

/// Canonical fields with none of their labels in the row
pub fn missing_fields(row: &RawRow) -> Vec<&'static str> {
    SHOW_FIELDS
        .iter()
        .filter(|f| !f.is_present(row))
        .map(|f| f.field)
        .collect()
}

pub fn is_sold_out(status: &str) -> bool {
    SOLD_OUT.is_match(status)
}

/// True unless the row names a different roster member in a member column.
/// Unknown member names are kept on the tab they were fetched from.
pub fn belongs_to(row: &RawRow, performer: Performer) -> bool {
    let member = MEMBER.resolve(row);
    match Performer::from_name(member) {
        Some(named) => named == performer,
        None => true,
    }
}

/// Map a raw row onto the canonical show record
pub fn normalize(row: &RawRow, performer: Performer) -> Show {
    let date = normalize_date_text(DATE.resolve(row));
    let time = Some(normalize_time_text(TIME.resolve(row))).filter(|t| !t.is_empty());
    let venue = match VENUE.resolve(row) {
        "" => DEFAULT_VENUE_LABEL.to_string(),
        v => v.to_string(),
    };
    let ticket_url = Some(TICKET.resolve(row))
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let status = STATUS.resolve(row).to_string();
    let starts_at = parse_instant(&date, time.as_deref());

    Show {
        performer,
        sold_out: is_sold_out(&status),
        date,
        time,
        city: CITY.resolve(row).to_string(),
        venue,
        ticket_url,
        status,
        starts_at,
    }
}
