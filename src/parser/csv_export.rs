use super::TabDecoder;
use crate::error::Result;
use crate::types::RawRow;
use csv::{ReaderBuilder, Trim};
use tracing::debug;

/// Published CSV export: first non-blank record is the header row.
///
/// Quoted fields may hold commas, newlines, and doubled quotes.
pub struct CsvExportDecoder;

impl TabDecoder for CsvExportDecoder {
    fn decode(&self, body: &str) -> Result<Vec<RawRow>> {
        let body = body.trim_start_matches('\u{feff}');
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(body.as_bytes());

        let mut headers: Option<Vec<String>> = None;
        let mut rows = Vec::new();

        for result in reader.records() {
            let record = result?;
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }

            let Some(header_row) = headers.as_ref() else {
                headers = Some(record.iter().map(|h| h.trim().to_string()).collect());
                continue;
            };

            let row: RawRow = header_row
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let cell = record.get(i).unwrap_or("").trim().to_string();
                    (header.clone(), cell)
                })
                .collect();
            rows.push(row);
        }

        debug!("CsvExportDecoder: decoded {} rows", rows.len());
        Ok(rows)
    }

    fn encoding(&self) -> &'static str {
        "csv"
    }
}
