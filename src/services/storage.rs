use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;

/// Narrow interface to the object store: upload bytes, get back the public
/// URL the stored object is reachable at.
#[async_trait]
pub trait StorageService: Send + Sync {
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String>;
}

pub struct S3StorageService {
    client: Client,
    bucket: String,
    /// Base under which uploaded objects are publicly reachable,
    /// e.g. `https://storage.example.com`.
    public_base: String,
}

impl S3StorageService {
    pub fn new(client: Client, bucket: String, public_base: String) -> Self {
        Self {
            client,
            bucket,
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await?;

        Ok(format!("{}/{}/{}", self.public_base, self.bucket, key))
    }
}
