//! Command implementations.

pub mod config;
pub mod plan;
pub mod store;
pub mod verify;

pub use self::config::execute_config;
pub use self::plan::execute_plan;
pub use self::store::execute_store;
pub use self::verify::execute_verify;

use crate::error::{CliError, Result};
use evidence_domain::{load_evidence, Evidence};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::debug;

/// Load evidence from files, then stdin, preserving order.
pub fn read_evidence(files: &[PathBuf], stdin: bool) -> Result<Vec<Evidence>> {
    if files.is_empty() && !stdin {
        return Err(CliError::InvalidInput(
            "Must specify evidence files or --stdin".to_string(),
        ));
    }

    let mut evidence = Vec::new();
    for path in files {
        let json = fs::read_to_string(path)?;
        let items = load_evidence(&json).map_err(|e| {
            CliError::InvalidInput(format!("{}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), count = items.len(), "Loaded evidence file");
        evidence.extend(items);
    }

    if stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        evidence.extend(load_evidence(&buffer)?);
    }

    Ok(evidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_evidence_requires_input() {
        assert!(matches!(
            read_evidence(&[], false),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_read_evidence_concatenates_files() {
        let mut first = NamedTempFile::new().unwrap();
        write!(
            first,
            r#"{{"evidence_id": "a", "observation_type": "article", "verification": {{"source": "github"}}}}"#
        )
        .unwrap();
        let mut second = NamedTempFile::new().unwrap();
        write!(
            second,
            r#"[{{"evidence_id": "b", "observation_type": "article", "verification": {{"source": "github"}}}}]"#
        )
        .unwrap();

        let items =
            read_evidence(&[first.path().to_path_buf(), second.path().to_path_buf()], false)
                .unwrap();
        let ids: Vec<&str> = items.iter().map(Evidence::label).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_read_evidence_names_bad_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"verification": {{"source": "github"}}}}"#).unwrap();

        let err = read_evidence(&[file.path().to_path_buf()], false).unwrap_err();
        assert!(err.to_string().contains("event_type"));
    }
}
