use super::TabSource;
use crate::error::Result;
use crate::types::{Performer, RawRow};
use tracing::info;

// (date, time, venue, ticket link)
type DemoRow = (&'static str, &'static str, &'static str, &'static str);

/// Offline source with a fixed sample schedule, for demos and local work
pub struct DemoSource;

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoSource {
    pub fn new() -> Self {
        Self
    }

    fn rows_for(performer: Performer) -> &'static [DemoRow] {
        match performer {
            Performer::Devin => &[
                ("2025-11-01", "8:00 PM", "DC Improv", "https://tickets.example.com/devin1"),
                ("2025-11-08", "7:30 PM", "Hotbed DC", "https://tickets.example.com/devin2"),
            ],
            Performer::Matt => &[(
                "2025-11-03",
                "7:30 PM",
                "Hotbed DC",
                "https://tickets.example.com/matt1",
            )],
            Performer::Pat => &[(
                "2025-11-05",
                "9:00 PM",
                "Arlington Drafthouse",
                "https://tickets.example.com/pat1",
            )],
        }
    }
}

#[async_trait::async_trait]
impl TabSource for DemoSource {
    fn source_name(&self) -> &'static str {
        "demo"
    }

    async fn fetch_rows(&self, performer: Performer) -> Result<Vec<RawRow>> {
        let rows: Vec<RawRow> = Self::rows_for(performer)
            .iter()
            .map(|(date, time, venue, link)| {
                RawRow::from([
                    ("date".to_string(), date.to_string()),
                    ("time".to_string(), time.to_string()),
                    ("venue".to_string(), venue.to_string()),
                    ("link".to_string(), link.to_string()),
                ])
            })
            .collect();
        info!("Serving {} demo rows for {}", rows.len(), performer);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_rows_per_performer() {
        let src = DemoSource::new();
        assert_eq!(src.fetch_rows(Performer::Devin).await.unwrap().len(), 2);
        let pat = src.fetch_rows(Performer::Pat).await.unwrap();
        assert_eq!(pat[0]["venue"], "Arlington Drafthouse");
        assert_eq!(pat[0]["link"], "https://tickets.example.com/pat1");
    }
}
