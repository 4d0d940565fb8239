//! Live show schedule pipeline: fetch each roster member's tab, normalize
//! rows into shows, drop past dates, sort, and filter by month and city.

pub mod apis;
pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod infra;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod presentation;
pub mod server;
pub mod types;

pub use error::{Result, ScheduleError};
pub use types::{Performer, RawRow, Show};
