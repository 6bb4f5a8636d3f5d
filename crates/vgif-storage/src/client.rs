//! OBS client implementation.
//!
//! Huawei OBS exposes the S3 API, so the client is the AWS SDK pointed at
//! the OBS endpoint with static credentials and path-style addressing.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};

/// Configuration for the OBS client.
#[derive(Debug, Clone)]
pub struct ObsConfig {
    /// OBS endpoint URL (S3 API endpoint)
    pub endpoint: String,
    /// Access key ID
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
    /// Bucket name
    pub bucket: String,
    /// Region for request signing
    pub region: String,
}

impl ObsConfig {
    /// Create config from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        Ok(Self {
            access_key_id: require_env("OBS_ACCESS_KEY_ID")?,
            secret_access_key: require_env("OBS_SECRET_ACCESS_KEY")?,
            endpoint: require_env("OBS_ENDPOINT")?,
            bucket: require_env("OBS_BUCKET_NAME")?,
            region: std::env::var("OBS_REGION").unwrap_or_else(|_| "auto".to_string()),
        })
    }
}

fn require_env(name: &str) -> StorageResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(StorageError::config(name)),
    }
}

/// Operations the job runner needs from the object store.
///
/// `ObsClient` is the production implementation; tests substitute a fake.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch an object to a local path, returning the bytes written.
    async fn download_file(&self, key: &str, path: &Path) -> StorageResult<u64>;

    /// Push a local file to the given key.
    async fn upload_file(&self, path: &Path, key: &str, content_type: &str) -> StorageResult<()>;

    /// Produce a time-limited GET URL for the object.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> StorageResult<String>;
}

/// Huawei OBS storage client.
#[derive(Clone)]
pub struct ObsClient {
    client: Client,
    bucket: String,
}

impl ObsClient {
    /// Create a new OBS client from configuration.
    pub fn new(config: ObsConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "obs",
        );

        let sdk_config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(&config.endpoint)
            .region(Region::new(config.region))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(sdk_config),
            bucket: config.bucket,
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        Ok(Self::new(ObsConfig::from_env()?))
    }

    /// Bucket this client operates on.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Release the connection resources.
    ///
    /// Infallible and safe to call after failed operations; the underlying
    /// HTTP pool is torn down when the last clone drops.
    pub fn close(self) {
        debug!("Closing OBS client for bucket {}", self.bucket);
        drop(self);
    }
}

#[async_trait]
impl ObjectStore for ObsClient {
    async fn download_file(&self, key: &str, path: &Path) -> StorageResult<u64> {
        debug!("Downloading {} to {}", key, path.display());

        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.to_string().contains("NoSuchKey") {
                    StorageError::NotFound(key.to_string())
                } else {
                    StorageError::download_failed(key, e.to_string())
                }
            })?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::File::create(path).await?;
        let mut body = response.body;
        let mut written: u64 = 0;

        while let Some(chunk) = body
            .try_next()
            .await
            .map_err(|e| StorageError::download_failed(key, e.to_string()))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        info!("Downloaded {} ({} bytes) to {}", key, written, path.display());
        Ok(written)
    }

    async fn upload_file(&self, path: &Path, key: &str, content_type: &str) -> StorageResult<()> {
        debug!("Uploading {} to {}", path.display(), key);

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| StorageError::upload_failed(key, e.to_string()))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(key, e.to_string()))?;

        info!("Uploaded {} to {}", path.display(), key);
        Ok(())
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        let presign_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::presign_failed(key, e.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presign_config)
            .await
            .map_err(|e| StorageError::presign_failed(key, e.to_string()))?;

        Ok(presigned.uri().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_obs_env() {
        for var in [
            "OBS_ACCESS_KEY_ID",
            "OBS_SECRET_ACCESS_KEY",
            "OBS_ENDPOINT",
            "OBS_BUCKET_NAME",
            "OBS_REGION",
        ] {
            std::env::remove_var(var);
        }
    }

    // Single test so env mutation never races a parallel test thread.
    #[test]
    fn test_config_missing_and_empty_vars() {
        clear_obs_env();
        std::env::set_var("OBS_ACCESS_KEY_ID", "ak");

        let err = ObsConfig::from_env().unwrap_err();
        assert!(matches!(err, StorageError::Config(ref v) if v == "OBS_SECRET_ACCESS_KEY"));

        // Empty counts as missing.
        std::env::set_var("OBS_ACCESS_KEY_ID", "");
        let err = ObsConfig::from_env().unwrap_err();
        assert!(matches!(err, StorageError::Config(ref v) if v == "OBS_ACCESS_KEY_ID"));

        clear_obs_env();
    }
}
