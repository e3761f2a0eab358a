use std::path::Path;

/// Payload kinds the store knows how to (de)serialize.
///
/// The registry is fixed: three content types, one canonical file extension
/// each. Stored key names depend on these staying stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Json,
    Csv,
    Proto,
}

impl ContentKind {
    /// MIME type recorded on uploaded objects.
    pub fn mime(&self) -> &'static str {
        match self {
            ContentKind::Json => "application/json",
            ContentKind::Csv => "text/csv",
            ContentKind::Proto => "application/x-protobuf",
        }
    }

    /// Canonical file extension for this kind.
    pub fn canonical_extension(&self) -> &'static str {
        match self {
            ContentKind::Json => "json",
            ContentKind::Csv => "csv",
            ContentKind::Proto => "pb",
        }
    }

    pub fn from_mime(mime: &str) -> Option<ContentKind> {
        match mime {
            "application/json" => Some(ContentKind::Json),
            "text/csv" => Some(ContentKind::Csv),
            "application/x-protobuf" => Some(ContentKind::Proto),
            _ => None,
        }
    }

    /// Forces the canonical extension onto `path`.
    ///
    /// A differing extension is kept and the canonical one appended after it
    /// (`"name.txt"` becomes `"name.txt.json"`), never substituted. Keys
    /// already written under compound names would move if this changed.
    pub fn normalize_path(&self, path: &str) -> String {
        let current = Path::new(path).extension().and_then(|ext| ext.to_str());
        let canonical = self.canonical_extension();
        if current == Some(canonical) {
            path.to_string()
        } else {
            format!("{path}.{canonical}")
        }
    }
}

/// Normalizes `path` for a raw MIME string.
///
/// Unrecognized content types leave the path untouched.
pub fn normalize(path: &str, content_type: &str) -> String {
    match ContentKind::from_mime(content_type) {
        Some(kind) => kind.normalize_path(path),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_extension_is_kept() {
        assert_eq!(ContentKind::Json.normalize_path("report.json"), "report.json");
        assert_eq!(ContentKind::Csv.normalize_path("data.csv"), "data.csv");
        assert_eq!(ContentKind::Proto.normalize_path("record.pb"), "record.pb");
    }

    #[test]
    fn test_missing_extension_is_appended() {
        assert_eq!(ContentKind::Json.normalize_path("report"), "report.json");
        assert_eq!(ContentKind::Csv.normalize_path("data"), "data.csv");
    }

    #[test]
    fn test_differing_extension_is_appended_not_replaced() {
        assert_eq!(ContentKind::Json.normalize_path("name.txt"), "name.txt.json");
        assert_eq!(ContentKind::Proto.normalize_path("dump.json"), "dump.json.pb");
    }

    #[test]
    fn test_directories_do_not_confuse_extension_lookup() {
        assert_eq!(
            ContentKind::Json.normalize_path("reports.d/daily"),
            "reports.d/daily.json"
        );
    }

    #[test]
    fn test_unrecognized_content_type_is_a_no_op() {
        assert_eq!(normalize("report", "application/pdf"), "report");
        assert_eq!(normalize("report.json", "text/plain"), "report.json");
    }

    #[test]
    fn test_registry_round_trips_through_mime() {
        for kind in [ContentKind::Json, ContentKind::Csv, ContentKind::Proto] {
            assert_eq!(ContentKind::from_mime(kind.mime()), Some(kind));
        }
        assert_eq!(ContentKind::from_mime("application/pdf"), None);
    }
}
