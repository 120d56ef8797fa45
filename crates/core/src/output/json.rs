//! JSON output formatter

use crate::output::FormatError;
use serde::Serialize;

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, FormatError> {
    serde_json::to_string_pretty(data).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Breadcrumb, Crumb, PageKind};

    #[test]
    fn test_format_json() {
        let data = Breadcrumb {
            kind: Some(PageKind::NotFound),
            crumbs: vec![Crumb::new("Error 404", "")],
        };

        let json = format_json(&data).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "not_found");
        assert_eq!(value["crumbs"][0]["label"], "Error 404");
        assert_eq!(value["crumbs"][0]["link"], "");
    }
}
