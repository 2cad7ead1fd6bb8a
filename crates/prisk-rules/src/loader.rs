//! Reading rule documents from disk or memory.
//!
//! The document format is picked from the file extension: `.yaml`/`.yml`
//! are read as YAML, everything else as JSON. Either way the result is
//! the same [`RuleDocument`] model, compiled into a [`RuleSet`] and tagged
//! with the SHA-256 digest of the source bytes.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::document::RuleDocument;
use crate::error::RuleLoadError;
use crate::ruleset::RuleSet;

/// Encoding of a rule document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// A compiled rule set and the digest of the text it came from.
#[derive(Debug, Clone)]
pub struct LoadedRuleSet {
    pub rules: RuleSet,
    /// Lowercase hex SHA-256 of the source bytes.
    pub digest: String,
}

/// Load and compile a rule file.
pub fn load_path(path: &Path) -> Result<LoadedRuleSet, RuleLoadError> {
    let text = read_source(path)?;
    load_str(&text, SourceFormat::from_path(path), Some(path))
}

pub(crate) fn read_source(path: &Path) -> Result<String, RuleLoadError> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RuleLoadError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RuleLoadError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Compile a rule document held in memory. `path` is only used for
/// error context.
pub fn load_str(
    text: &str,
    format: SourceFormat,
    path: Option<&Path>,
) -> Result<LoadedRuleSet, RuleLoadError> {
    let doc: RuleDocument = match format {
        SourceFormat::Json => {
            serde_json::from_str(text).map_err(|source| RuleLoadError::JsonParse {
                path: path.map(Path::to_path_buf),
                source,
            })?
        }
        SourceFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|source| RuleLoadError::YamlParse {
                path: path.map(Path::to_path_buf),
                source,
            })?
        }
    };
    Ok(LoadedRuleSet {
        rules: RuleSet::compile(doc)?,
        digest: source_digest(text.as_bytes()),
    })
}

/// Hex SHA-256 of a rule document's bytes.
pub fn source_digest(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const JSON: &str = r#"{"precedence": ["mid", "basic"], "rules": [{"when": "cameras", "set": {"level": "basic"}}]}"#;

    #[test]
    fn format_from_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("r.yaml")), SourceFormat::Yaml);
        assert_eq!(SourceFormat::from_path(Path::new("r.YML")), SourceFormat::Yaml);
        assert_eq!(SourceFormat::from_path(Path::new("r.json")), SourceFormat::Json);
        assert_eq!(SourceFormat::from_path(Path::new("rules")), SourceFormat::Json);
    }

    #[test]
    fn json_and_yaml_compile_to_the_same_rules() {
        let yaml = "precedence: [mid, basic]\nrules:\n  - when: cameras\n    set: {level: basic}\n";
        let a = load_str(JSON, SourceFormat::Json, None).unwrap();
        let b = load_str(yaml, SourceFormat::Yaml, None).unwrap();
        assert_eq!(a.rules.rules.len(), b.rules.rules.len());
        assert_eq!(a.rules.rules[0].effect, b.rules.rules[0].effect);
        assert_ne!(a.digest, b.digest);
    }

    #[test]
    fn digest_is_stable_hex() {
        let a = load_str(JSON, SourceFormat::Json, None).unwrap();
        let b = load_str(JSON, SourceFormat::Json, None).unwrap();
        assert_eq!(a.digest, b.digest);
        assert_eq!(a.digest.len(), 64);
        assert!(a.digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn parse_error_carries_path() {
        let err = load_str("{", SourceFormat::Json, Some(Path::new("x.json"))).unwrap_err();
        match err {
            RuleLoadError::JsonParse { path, .. } => assert_eq!(path, Some(PathBuf::from("x.json"))),
            other => panic!("expected JsonParse, got {other:?}"),
        }
    }

    #[test]
    fn missing_file() {
        let err = load_path(Path::new("/nonexistent/prisk/rules.json")).unwrap_err();
        assert!(matches!(err, RuleLoadError::FileNotFound { .. }));
    }
}
