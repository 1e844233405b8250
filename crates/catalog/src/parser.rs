//! Parser for marketplace dataset files.
//!
//! A dataset directory holds two JSON documents:
//! - services.json: array of `ServiceData`
//! - behaviors.json: array of `UserBehavior`
//!
//! Decoding errors carry the file name plus the line and column reported by
//! serde_json so a broken fixture can be fixed without guesswork.

use crate::error::{DataLoadError, Result};
use crate::types::{ServiceData, UserBehavior};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// File name of the service catalog inside a dataset directory
pub const SERVICES_FILE: &str = "services.json";

/// File name of the behavior profiles inside a dataset directory
pub const BEHAVIORS_FILE: &str = "behaviors.json";

/// Read a whole file, mapping a missing file to `FileNotFound`
fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// Decode a JSON array of records, attaching file position to failures
fn parse_records<T: DeserializeOwned>(content: &str, file: &str) -> Result<Vec<T>> {
    serde_json::from_str(content).map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line: e.line(),
        column: e.column(),
        reason: e.to_string(),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the services.json file
pub fn parse_services(path: &Path) -> Result<Vec<ServiceData>> {
    let content = read_file(path)?;
    parse_services_str(&content, &file_label(path))
}

/// Parse a services document already held in memory
pub fn parse_services_str(content: &str, file: &str) -> Result<Vec<ServiceData>> {
    parse_records(content, file)
}

/// Parse the behaviors.json file
pub fn parse_behaviors(path: &Path) -> Result<Vec<UserBehavior>> {
    let content = read_file(path)?;
    parse_behaviors_str(&content, &file_label(path))
}

/// Parse a behaviors document already held in memory
pub fn parse_behaviors_str(content: &str, file: &str) -> Result<Vec<UserBehavior>> {
    parse_records(content, file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_services() {
        let json = r#"[
            {"id": "s1", "title": "Deep Cleaning", "category": "Cleaning", "price": 15000,
             "location": "Lagos", "rating": 4.8, "providerId": "p1", "tags": ["home"]},
            {"id": "s2", "title": "Leak Fix", "category": "Plumbing", "price": 9000,
             "location": "Abuja", "rating": 4.1, "providerId": "p2"}
        ]"#;

        let services = parse_services_str(json, "services.json").unwrap();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].tags, vec!["home".to_string()]);
        assert_eq!(services[1].category, "Plumbing");
    }

    #[test]
    fn test_parse_error_reports_position() {
        let json = "[\n  {\"id\": \"s1\", \"title\": }\n]";

        let err = parse_services_str(json, "services.json").unwrap_err();
        match err {
            DataLoadError::ParseError { file, line, .. } => {
                assert_eq!(file, "services.json");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_behaviors_missing_location_fails() {
        let json = r#"[{"userId": "u1"}]"#;
        let result = parse_behaviors_str(json, "behaviors.json");
        assert!(matches!(result, Err(DataLoadError::ParseError { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = parse_services(Path::new("definitely/not/here/services.json"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
    }
}
