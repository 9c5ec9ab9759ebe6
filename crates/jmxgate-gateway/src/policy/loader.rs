//! Restrictor resolution from a policy location.
//!
//! - no location        -> allow-all (info)
//! - unreadable/invalid -> deny-all (error, fail closed)
//! - loaded             -> [`PolicyRestrictor`]

use std::fs;
use std::io;
use std::sync::Arc;

use thiserror::Error;

use jmxgate_core::error::BridgeError;
use jmxgate_core::log::LogSink;
use jmxgate_core::restrictor::{AllowAllRestrictor, DenyAllRestrictor, Restrictor};

use super::document::{PolicyDocument, PolicyRestrictor};

#[derive(Debug, Error)]
pub enum PolicyLoadError {
    #[error("cannot read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid policy in {location}: {source}")]
    Invalid {
        location: String,
        #[source]
        source: BridgeError,
    },
}

/// Read and compile the policy document at `location` (`file:` prefix optional).
pub fn lookup_policy_restrictor(location: &str) -> Result<PolicyRestrictor, PolicyLoadError> {
    let path = location.strip_prefix("file:").unwrap_or(location);
    let raw = fs::read_to_string(path).map_err(|source| PolicyLoadError::Io {
        location: location.to_string(),
        source,
    })?;
    let doc: PolicyDocument = serde_yaml::from_str(&raw).map_err(|source| PolicyLoadError::Parse {
        location: location.to_string(),
        source,
    })?;
    PolicyRestrictor::compile(location, &doc).map_err(|source| PolicyLoadError::Invalid {
        location: location.to_string(),
        source,
    })
}

/// Resolve the process-wide restrictor. Never fails.
pub fn create_restrictor(location: Option<&str>, log: &dyn LogSink) -> Arc<dyn Restrictor> {
    let Some(location) = location.map(str::trim).filter(|l| !l.is_empty()) else {
        log.info("No access restrictor configured, access to all MBeans is allowed");
        return Arc::new(AllowAllRestrictor);
    };

    match lookup_policy_restrictor(location) {
        Ok(r) => {
            log.info(&format!("Using access restrictor {location}"));
            Arc::new(r)
        }
        Err(e) => {
            log.error(
                &format!(
                    "Error while accessing access restrictor at {location}. \
                     Denying all access to MBeans for security reasons. Exception: {e}"
                ),
                Some(&e),
            );
            Arc::new(DenyAllRestrictor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLog {
        lines: Mutex<Vec<(String, String, bool)>>,
    }

    impl RecordingLog {
        fn levels(&self) -> Vec<String> {
            self.lines.lock().unwrap().iter().map(|(l, _, _)| l.clone()).collect()
        }
    }

    impl LogSink for RecordingLog {
        fn debug(&self, message: &str) {
            self.lines.lock().unwrap().push(("debug".into(), message.into(), false));
        }
        fn info(&self, message: &str) {
            self.lines.lock().unwrap().push(("info".into(), message.into(), false));
        }
        fn error(&self, message: &str, cause: Option<&(dyn std::error::Error + 'static)>) {
            self.lines
                .lock()
                .unwrap()
                .push(("error".into(), message.into(), cause.is_some()));
        }
    }

    #[test]
    fn unset_location_allows_all() {
        let log = RecordingLog::default();
        let r = create_restrictor(None, &log);
        assert!(r.is_remote_access_allowed("10.0.0.9"));
        assert!(r.is_origin_allowed(Some("http://x")));
        assert_eq!(log.levels(), vec!["info"]);

        let r = create_restrictor(Some("   "), &log);
        assert_eq!(r.to_string(), "AllowAllRestrictor");
    }

    #[test]
    fn unreadable_location_denies_all_and_logs_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a file: simulated I/O failure.
        let loc = dir.path().to_string_lossy().to_string();
        let log = RecordingLog::default();

        let r = create_restrictor(Some(&loc), &log);
        assert_eq!(r.to_string(), "DenyAllRestrictor");
        assert!(!r.is_remote_access_allowed("127.0.0.1"));

        let lines = log.lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, "error");
        assert!(lines[0].1.contains("Denying all access"));
        assert!(lines[0].2, "cause must be attached");
    }

    #[test]
    fn missing_file_denies_all() {
        let log = RecordingLog::default();
        let r = create_restrictor(Some("file:/definitely/not/here/access.yaml"), &log);
        assert_eq!(r.to_string(), "DenyAllRestrictor");
        assert_eq!(log.levels(), vec!["error"]);
    }

    #[test]
    fn invalid_yaml_denies_all() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "remote: [unterminated").unwrap();
        let log = RecordingLog::default();
        let r = create_restrictor(f.path().to_str(), &log);
        assert_eq!(r.to_string(), "DenyAllRestrictor");
    }

    #[test]
    fn invalid_rule_denies_all() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "remote: [\"10.0.0.0/99\"]").unwrap();
        let err = lookup_policy_restrictor(f.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, PolicyLoadError::Invalid { .. }));
    }

    #[test]
    fn valid_document_is_used() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "remote: [\"127.0.0.1\"]").unwrap();
        let loc = format!("file:{}", f.path().display());
        let log = RecordingLog::default();

        let r = create_restrictor(Some(&loc), &log);
        assert!(r.to_string().starts_with("PolicyRestrictor["));
        assert!(r.is_remote_access_allowed("127.0.0.1"));
        assert!(!r.is_remote_access_allowed("10.0.0.9"));
        assert_eq!(log.levels(), vec!["info"]);
    }
}
