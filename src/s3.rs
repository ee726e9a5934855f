use crate::config::Config;
use async_trait::async_trait;
use s3::{creds::Credentials, error::S3Error, Bucket, Region};

/// The one storage operation the uploader consumes. Everything behind it is
/// fixed at construction time, so concurrent callers share it freely.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, contents: &[u8]) -> Result<(), S3Error>;
}

#[async_trait]
impl ObjectStore for Bucket {
    async fn put(&self, key: &str, contents: &[u8]) -> Result<(), S3Error> {
        self.put_object(key, contents).await?;
        Ok(())
    }
}

/// Builds the shared bucket handle from config: custom endpoint if one was
/// given, path-style addressing always on, and the ACL header attached only
/// when an ACL was actually configured.
pub fn connect(config: &Config) -> color_eyre::Result<Box<Bucket>> {
    let credentials = Credentials::new(
        config.access_key.as_deref(),
        config.secret_key.as_deref(),
        None,
        None,
        None,
    )?;

    let region = match config.endpoint.clone() {
        Some(endpoint) => Region::Custom {
            region: config.region.clone(),
            endpoint,
        },
        None => config.region.parse()?,
    };

    let mut bucket = Bucket::new(&config.bucket, region, credentials)?.with_path_style();
    if let Some(acl) = &config.acl {
        bucket.extra_headers.insert("x-amz-acl", acl.parse()?);
    }

    Ok(bucket)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: Option<&str>) -> Config {
        Config {
            source: "/srv/site".to_owned(),
            region: "us-east-1".to_owned(),
            endpoint: endpoint.map(str::to_owned),
            bucket: "uploads".to_owned(),
            prefix: String::new(),
            access_key: Some("key".to_owned()),
            secret_key: Some("secret".to_owned()),
            acl: None,
            verbose: false,
        }
    }

    #[test]
    fn connects_to_a_custom_endpoint() {
        let bucket = connect(&config(Some("http://localhost:9000"))).unwrap();
        assert_eq!(bucket.name(), "uploads");
        assert!(bucket.is_path_style());
    }

    #[test]
    fn acl_header_only_exists_when_configured() {
        let mut cfg = config(Some("http://localhost:9000"));
        let bucket = connect(&cfg).unwrap();
        assert!(bucket.extra_headers.get("x-amz-acl").is_none());

        cfg.acl = Some("public-read".to_owned());
        let bucket = connect(&cfg).unwrap();
        let header = bucket.extra_headers.get("x-amz-acl").unwrap();
        assert_eq!(header.to_str().unwrap(), "public-read");
    }

    #[test]
    fn connects_to_the_default_provider() {
        let bucket = connect(&config(None)).unwrap();
        assert_eq!(bucket.region(), Region::UsEast1);
    }
}
