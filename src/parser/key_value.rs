use super::TabDecoder;
use crate::error::{Result, ScheduleError};
use crate::types::RawRow;
use serde_json::Value;
use tracing::debug;

const ENCODING: &str = "api";

/// Simple JSON API. Accepts either an array of row objects keyed by column
/// name, or a values-range envelope `{"values": [[header...], [cells...]]}`.
pub struct KeyValueDecoder;

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()),
        other => Some(other.to_string()),
    }
}

fn decode_objects(items: &[Value]) -> Vec<RawRow> {
    items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let row: RawRow = obj
                .iter()
                .filter_map(|(k, v)| Some((k.trim().to_string(), cell_text(v)?)))
                .collect();
            Some(row)
        })
        .collect()
}

fn decode_values_range(values: &[Value]) -> Result<Vec<RawRow>> {
    let mut lines = values.iter();
    let Some(header_line) = lines.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_line
        .as_array()
        .ok_or_else(|| ScheduleError::malformed(ENCODING, "values header row is not an array"))?
        .iter()
        .map(|h| cell_text(h).unwrap_or_default())
        .collect();

    let rows = lines
        .filter_map(Value::as_array)
        .map(|cells| {
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let text = cells.get(i).and_then(cell_text).unwrap_or_default();
                    (header.clone(), text)
                })
                .collect()
        })
        .collect();
    Ok(rows)
}

impl TabDecoder for KeyValueDecoder {
    fn decode(&self, body: &str) -> Result<Vec<RawRow>> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ScheduleError::malformed(ENCODING, e.to_string()))?;

        let rows = match &value {
            Value::Array(items) => decode_objects(items),
            Value::Object(obj) => match obj.get("values") {
                Some(Value::Array(values)) => decode_values_range(values)?,
                // The values API omits the key entirely for an empty range
                None => Vec::new(),
                Some(_) => {
                    return Err(ScheduleError::malformed(ENCODING, "`values` is not an array"))
                }
            },
            _ => {
                return Err(ScheduleError::malformed(
                    ENCODING,
                    "expected an array of rows or a values envelope",
                ))
            }
        };

        debug!("KeyValueDecoder: decoded {} rows", rows.len());
        Ok(rows)
    }

    fn encoding(&self) -> &'static str {
        ENCODING
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_array_of_objects() {
        let body = r#"[{"Date":" 2025-11-05 ","Time":"7:30 PM","Capacity":80,"Status":null}]"#;
        let rows = KeyValueDecoder.decode(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Date"], "2025-11-05");
        assert_eq!(rows[0]["Capacity"], "80");
        assert!(!rows[0].contains_key("Status"));
    }

    #[test]
    fn test_values_range_pads_short_rows() {
        let body = r#"{"range":"Shows!A1:E3","values":[["member","date","time","venue","link"],["Devin","2025-11-01","8:00 PM","DC Improv"]]}"#;
        let rows = KeyValueDecoder.decode(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["member"], "Devin");
        assert_eq!(rows[0]["venue"], "DC Improv");
        assert_eq!(rows[0]["link"], "");
    }

    #[test]
    fn test_empty_values_range() {
        assert!(KeyValueDecoder.decode(r#"{"range":"Shows!A:E"}"#).unwrap().is_empty());
    }

    #[test]
    fn test_scalar_body_is_malformed() {
        let err = KeyValueDecoder.decode("42").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
        let err = KeyValueDecoder.decode("[{").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
    }
}
