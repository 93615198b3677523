use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;

// One kubeconfig context as listed by the store: context name, cluster and the file it lives in
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub context: String,
    pub cluster: String,
    pub file: String,
}

impl Metadata {
    pub fn new(context: &str, cluster: &str, file: &str) -> Self {
        Metadata {
            context: context.to_string(),
            cluster: cluster.to_string(),
            file: file.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read records from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse records JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parses a JSON array of records, keeping the order they were listed in.
pub fn parse(json: &str) -> Result<Vec<Metadata>, StoreError> {
    Ok(serde_json::from_str(json)?)
}

/// Loads records from `path`, or from stdin when `path` is `-`.
pub fn load(path: &str) -> Result<Vec<Metadata>, StoreError> {
    let read_err = |source: io::Error| StoreError::Read {
        path: path.to_string(),
        source,
    };
    let raw = if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        buf
    } else {
        fs::read_to_string(Path::new(path)).map_err(read_err)?
    };
    let items = parse(&raw)?;
    tracing::debug!(path, count = items.len(), "loaded records");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_listing_order() {
        let json = r#"[
            {"context": "prod", "cluster": "c2", "file": "f2.yaml"},
            {"context": "dev", "cluster": "c1", "file": "f1.yaml"}
        ]"#;
        let items = parse(json).unwrap();
        assert_eq!(
            items,
            vec![
                Metadata::new("prod", "c2", "f2.yaml"),
                Metadata::new("dev", "c1", "f1.yaml"),
            ]
        );
    }

    #[test]
    fn parse_rejects_malformed_input() {
        let err = parse(r#"[{"context": "dev""#).unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse records JSON"));
    }

    #[test]
    fn load_reports_missing_file_with_path() {
        let err = load("/nonexistent/konf-records.json").unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/konf-records.json"));
    }
}
