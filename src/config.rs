use crate::error::Error;
use std::env;

/// Everything the run needs, read from the environment exactly once.
///
/// Nothing else in the crate touches process state: the client constructor
/// and the uploader both take this by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub source: String,
    pub region: String,
    pub endpoint: Option<String>,
    pub bucket: String,
    pub prefix: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub acl: Option<String>,
    pub verbose: bool,
}

pub const DEFAULT_REGION: &str = "us-east-1";

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// `SOURCE` is the only required variable; its absence fails the run
    /// before any filesystem or network I/O happens. Empty strings count as
    /// unset for the optional variables.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let set = |key: &str| var(key).filter(|v| !v.is_empty());

        let Some(source) = set("SOURCE") else {
            return Err(Error::MissingConfig("SOURCE"));
        };

        Ok(Self {
            source,
            region: set("S3_REGION").unwrap_or_else(|| DEFAULT_REGION.to_owned()),
            endpoint: set("S3_ENDPOINT"),
            bucket: var("S3_BUCKET").unwrap_or_default(),
            prefix: var("S3_PREFIX").unwrap_or_default(),
            access_key: var("S3_ACCESS_KEY_ID"),
            secret_key: var("S3_SECRET_ACCESS_KEY"),
            acl: set("S3_ACL"),
            verbose: set("VERBOSE").is_some(),
        })
    }
}
