/// Roster tab names as they appear in the upstream spreadsheet
pub const DEVIN_TAB: &str = "Devin";
pub const PAT_TAB: &str = "Pat";
pub const MATT_TAB: &str = "Matt";

/// Sentinel filter value that matches every show
pub const ALL_SELECTION: &str = "all";

/// Label used when a row has no venue
pub const DEFAULT_VENUE_LABEL: &str = "Show";

/// Generic message surfaced when any tab fails to load
pub const LOAD_ERROR_MESSAGE: &str = "Could not load shows.";

// Column aliases, consulted in order. The first label present in a row wins,
// even when its cell is empty.
pub const DATE_COLUMNS: &[&str] = &["Date", "date"];
pub const TIME_COLUMNS: &[&str] = &["Time", "time"];
pub const CITY_COLUMNS: &[&str] = &["City", "city"];
pub const VENUE_COLUMNS: &[&str] = &["Venue", "venue", "Venue/Show Name"];
pub const TICKET_COLUMNS: &[&str] = &[
    "Ticket",
    "Tickets",
    "ticket",
    "tickets",
    "Link",
    "link",
    "Ticket Link",
    "Buy Link",
];
pub const STATUS_COLUMNS: &[&str] = &["Status", "status"];
pub const MEMBER_COLUMNS: &[&str] = &["Member", "member", "Performer", "performer"];

/// Default published-sheet base used when no configuration is provided
pub const DEFAULT_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vRVtnWrYtSM5a5KMeb_k7qIukbJbnkoMqRhFDgJ60I2obN1pycbQo4E-SchhDDhZL3UqCU9N_A_LNFM/pub?output=csv";
pub const DEFAULT_TAB_PARAM: &str = "sheet";
