//! Decoders that turn one tab's response body into raw rows.
//!
//! Each upstream encoding gets one `TabDecoder`. Which decoder runs is fixed
//! by configuration when the source is built, never guessed per response.

pub mod csv_export;
pub mod gviz;
pub mod key_value;

use crate::config::SourceEncoding;
use crate::error::Result;
use crate::types::RawRow;

pub use csv_export::CsvExportDecoder;
pub use gviz::GvizDecoder;
pub use key_value::KeyValueDecoder;

pub trait TabDecoder: Send + Sync {
    /// Decode a full response body into raw rows
    fn decode(&self, body: &str) -> Result<Vec<RawRow>>;

    /// Short encoding name for logs and errors
    fn encoding(&self) -> &'static str;
}

/// Returns a decoder for network-backed encodings, `None` for `demo`
pub fn create_decoder(encoding: SourceEncoding) -> Option<Box<dyn TabDecoder>> {
    match encoding {
        SourceEncoding::Csv => Some(Box::new(CsvExportDecoder)),
        SourceEncoding::Gviz => Some(Box::new(GvizDecoder)),
        SourceEncoding::Api => Some(Box::new(KeyValueDecoder)),
        SourceEncoding::Demo => None,
    }
}

/// True when a body is an HTML document (e.g. a sign-in page) rather than data
pub fn looks_like_markup(body: &str) -> bool {
    body.to_ascii_lowercase().contains("<html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_sniff() {
        assert!(looks_like_markup("<!DOCTYPE html><HTML lang=\"en\"><body>Sign in</body>"));
        assert!(!looks_like_markup("Date,Time,City\n2025-11-05,7:30 PM,Reston"));
    }

    #[test]
    fn test_demo_has_no_decoder() {
        assert!(create_decoder(SourceEncoding::Demo).is_none());
        assert_eq!(
            create_decoder(SourceEncoding::Gviz).map(|d| d.encoding()),
            Some("gviz")
        );
    }
}
