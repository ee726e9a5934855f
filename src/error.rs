use s3::error::S3Error;
use std::{io, path::PathBuf};
use thiserror::Error as ThisError;

/// Every failure carries the path it happened on, so a failed run can be
/// diagnosed without re-running with extra instrumentation.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("required env var {0} is not set")]
    MissingConfig(&'static str),
    #[error("error reading {}: {source}", path.display())]
    Traversal { path: PathBuf, source: io::Error },
    #[error("error uploading {}: {source}", path.display())]
    Upload { path: PathBuf, source: S3Error },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_path() {
        let err = Error::Traversal {
            path: PathBuf::from("/srv/site/a.txt"),
            source: io::Error::other("permission denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/srv/site/a.txt"));
        assert!(msg.contains("permission denied"));

        let err = Error::Upload {
            path: PathBuf::from("/srv/site/b.txt"),
            source: S3Error::HttpFailWithBody(403, "AccessDenied".to_owned()),
        };
        assert!(err.to_string().contains("/srv/site/b.txt"));
    }

    #[test]
    fn missing_config_names_the_env_var() {
        assert_eq!(
            Error::MissingConfig("SOURCE").to_string(),
            "required env var SOURCE is not set"
        );
    }
}
