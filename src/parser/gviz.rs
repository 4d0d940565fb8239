use super::TabDecoder;
use crate::error::{Result, ScheduleError};
use crate::types::RawRow;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

const ENCODING: &str = "gviz";

/// Query-table JSON export, delivered wrapped in a JS callback such as
/// `google.visualization.Query.setResponse({...});`
pub struct GvizDecoder;

#[derive(Debug, Deserialize)]
struct GvizResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Vec<GvizError>,
    table: Option<GvizTable>,
}

#[derive(Debug, Deserialize)]
struct GvizError {
    #[serde(default)]
    reason: String,
    #[serde(default)]
    detailed_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GvizTable {
    #[serde(default)]
    cols: Vec<GvizColumn>,
    #[serde(default)]
    rows: Vec<GvizRow>,
}

#[derive(Debug, Deserialize)]
struct GvizColumn {
    #[serde(default)]
    label: String,
}

#[derive(Debug, Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

#[derive(Debug, Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: Option<Value>,
    #[serde(default)]
    f: Option<String>,
}

impl GvizRow {
    fn cell_text(&self, index: usize) -> String {
        self.c
            .get(index)
            .and_then(|cell| cell.as_ref())
            .map(GvizCell::text)
            .unwrap_or_default()
    }
}

impl GvizCell {
    /// Formatted value first, then the raw value, then empty
    fn text(&self) -> String {
        if let Some(formatted) = &self.f {
            return formatted.trim().to_string();
        }
        match &self.v {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

/// Strip the callback wrapper, leaving the JSON object literal
fn unwrap_envelope(body: &str) -> Result<&str> {
    let start = body.find('{');
    let end = body.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(&body[start..=end]),
        _ => Err(ScheduleError::malformed(
            ENCODING,
            "response has no JSON object inside the callback wrapper",
        )),
    }
}

impl TabDecoder for GvizDecoder {
    fn decode(&self, body: &str) -> Result<Vec<RawRow>> {
        let json = unwrap_envelope(body)?;
        let response: GvizResponse = serde_json::from_str(json)
            .map_err(|e| ScheduleError::malformed(ENCODING, e.to_string()))?;

        if response.status.as_deref() == Some("error") {
            let detail = response
                .errors
                .first()
                .map(|e| e.detailed_message.clone().unwrap_or_else(|| e.reason.clone()))
                .unwrap_or_else(|| "query returned status=error".to_string());
            return Err(ScheduleError::malformed(ENCODING, detail));
        }

        let table = response
            .table
            .ok_or_else(|| ScheduleError::malformed(ENCODING, "response has no table"))?;

        let mut labels: Vec<String> = table
            .cols
            .iter()
            .map(|c| c.label.trim().to_string())
            .collect();
        let mut body_rows = table.rows.as_slice();
        if labels.iter().all(|l| l.is_empty()) {
            // No parsed headers: the first non-blank row carries them
            let header_at = body_rows
                .iter()
                .position(|row| (0..row.c.len()).any(|i| !row.cell_text(i).is_empty()));
            match header_at {
                Some(at) => {
                    let header = &body_rows[at];
                    let width = labels.len().max(header.c.len());
                    labels = (0..width).map(|i| header.cell_text(i)).collect();
                    body_rows = &body_rows[at + 1..];
                    debug!("GvizDecoder: promoted row {} to header", at);
                }
                None => {
                    warn!("GvizDecoder: table has no column labels and no header row");
                    return Ok(Vec::new());
                }
            }
        }

        let rows: Vec<RawRow> = body_rows
            .iter()
            .map(|row| {
                labels
                    .iter()
                    .enumerate()
                    .filter(|(_, label)| !label.is_empty())
                    .map(|(i, label)| (label.clone(), row.cell_text(i)))
                    .collect()
            })
            .collect();

        debug!("GvizDecoder: decoded {} rows over {} columns", rows.len(), labels.len());
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

    const SAMPLE: &str = r#"/*O_o*/
google.visualization.Query.setResponse({"version":"0.6","reqId":"0","status":"ok","sig":"1","table":{"cols":[{"id":"A","label":"Date","type":"date"},{"id":"B","label":"Time","type":"datetime"},{"id":"C","label":" City ","type":"string"},{"id":"D","label":"Tickets","type":"string"}],"rows":[{"c":[{"v":"Date(2025,10,5)"},{"v":"Date(1899,11,30,19,30,0)"},{"v":"Reston"},null]},{"c":[{"v":"Date(2025,10,6)","f":"11/6/2025"},null,{"v":" Arlington "}]}],"parsedNumHeaders":1}});"#;

    #[test]
    fn test_decodes_wrapped_table() {
        let rows = GvizDecoder.decode(SAMPLE).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Date"], "Date(2025,10,5)");
        assert_eq!(rows[0]["Time"], "Date(1899,11,30,19,30,0)");
        assert_eq!(rows[0]["City"], "Reston");
        assert_eq!(rows[0]["Tickets"], "");
    }

    #[test]
    fn test_prefers_formatted_value() {
        let rows = GvizDecoder.decode(SAMPLE).unwrap();
        assert_eq!(rows[1]["Date"], "11/6/2025");
        assert_eq!(rows[1]["City"], "Arlington");
        // Rows shorter than the column list pad with empty cells
        assert_eq!(rows[1]["Time"], "");
        assert_eq!(rows[1]["Tickets"], "");
    }

    #[test]
    fn test_numeric_raw_value_renders_as_text() {
        let body = r#"cb({"status":"ok","table":{"cols":[{"label":"Capacity"}],"rows":[{"c":[{"v":120}]}]}});"#;
        let rows = GvizDecoder.decode(body).unwrap();
        assert_eq!(rows[0]["Capacity"], "120");
    }

    #[test]
    fn test_missing_wrapper_is_malformed() {
        let err = GvizDecoder.decode("not json at all").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
    }

    #[test]
    fn test_blank_labels_take_header_from_first_row() {
        let body = r#"cb({"status":"ok","table":{"cols":[{"label":""},{"label":""}],"rows":[{"c":[{"v":"Date"},{"v":"Time"}]},{"c":[{"v":"2099-01-01"},{"v":"8:00 PM"}]}],"parsedNumHeaders":0}});"#;
        let rows = GvizDecoder.decode(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Date"], "2099-01-01");
        assert_eq!(rows[0]["Time"], "8:00 PM");
        assert!(!rows[0].contains_key(""));
    }

    #[test]
    fn test_blank_labels_and_blank_rows_decode_empty() {
        let body = r#"cb({"status":"ok","table":{"cols":[{"label":""}],"rows":[{"c":[null]}]}});"#;
        assert!(GvizDecoder.decode(body).unwrap().is_empty());
    }

    #[test]
    fn test_error_status_is_malformed() {
        let body = r#"setResponse({"status":"error","errors":[{"reason":"invalid_query","detailed_message":"Invalid sheet"}]});"#;
        let err = GvizDecoder.decode(body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
        assert!(err.to_string().contains("Invalid sheet"));
    }
}
