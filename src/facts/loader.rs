use std::fs;
use std::path::Path;
use thiserror::Error;

use super::Facts;

/// Errors that can occur while loading facts from disk.
#[derive(Error, Debug)]
pub enum FactsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON conversion error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Load facts from a YAML (or JSON) file containing a single mapping.
///
/// Entries keep the order in which they appear in the document.
pub fn load_facts(path: impl AsRef<Path>) -> Result<Facts, FactsError> {
    let content = fs::read_to_string(path)?;
    parse_facts(&content)
}

/// Parse facts from a YAML (or JSON) document.
pub fn parse_facts(content: &str) -> Result<Facts, FactsError> {
    let document: serde_yaml::Value = serde_yaml::from_str(content)?;

    let mapping = match document {
        serde_yaml::Value::Null => return Ok(Facts::new()),
        serde_yaml::Value::Mapping(mapping) => mapping,
        other => {
            return Err(FactsError::Validation(format!(
                "facts document must be a mapping, got {:?}",
                other
            )))
        }
    };

    let mut facts = Facts::new();
    for (key, value) in mapping {
        let name = match key {
            serde_yaml::Value::String(name) => name,
            other => {
                return Err(FactsError::Validation(format!(
                    "fact names must be strings, got {:?}",
                    other
                )))
            }
        };
        facts.put(name, serde_json::to_value(value)?);
    }

    Ok(facts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_facts() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
name: bob
age: 17
tags: [vip, early]
address:
  city: Lyon
"#
        )
        .unwrap();

        let facts = load_facts(file.path()).unwrap();

        assert_eq!(facts.len(), 4);
        assert_eq!(facts.get("age"), Some(&json!(17)));
        assert_eq!(facts.get("tags"), Some(&json!(["vip", "early"])));
        assert_eq!(facts.get("address"), Some(&json!({"city": "Lyon"})));

        let names: Vec<&str> = facts.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "age", "tags", "address"]);
    }

    #[test]
    fn test_load_json_facts() {
        let facts = parse_facts(r#"{"rain": true, "temperature": 12.5}"#).unwrap();

        assert_eq!(facts.get("rain"), Some(&json!(true)));
        assert_eq!(facts.get("temperature"), Some(&json!(12.5)));
    }

    #[test]
    fn test_empty_document() {
        let facts = parse_facts("").unwrap();
        assert!(facts.is_empty());
    }

    #[test]
    fn test_rejects_non_mapping() {
        let result = parse_facts("- a\n- b\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("mapping"));
    }

    #[test]
    fn test_rejects_non_string_key() {
        let result = parse_facts("1: one\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("strings"));
    }

    #[test]
    fn test_missing_file() {
        let result = load_facts("/nonexistent/facts.yaml");
        assert!(matches!(result, Err(FactsError::Io(_))));
    }
}
