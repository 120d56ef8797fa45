//! YAML output formatter

use crate::output::FormatError;
use serde::Serialize;

/// Format data as YAML
pub fn format_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, FormatError> {
    serde_yaml::to_string(data).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BatchReport, Breadcrumb, Crumb, NamedBreadcrumb, PageKind};
    use std::time::Duration;

    #[test]
    fn test_format_yaml() {
        let report = BatchReport::new(
            vec![NamedBreadcrumb {
                name: "archive".to_string(),
                breadcrumb: Breadcrumb {
                    kind: Some(PageKind::Category),
                    crumbs: vec![Crumb::new("News", "https://example.com/category/news/")],
                },
            }],
            Duration::from_millis(3),
        );

        let yaml = format_yaml(&report).unwrap();
        assert!(yaml.contains("trails:"));
        assert!(yaml.contains("name: archive"));
        assert!(yaml.contains("kind: category"));
        assert!(yaml.contains("total_contexts: 1"));
    }
}
