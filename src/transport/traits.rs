//! Transport trait for document delivery

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Something that can POST a JSON body with a detached signature header
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `body` with `signature` as the `Signature` header.
    /// Only an HTTP 200 counts as success.
    async fn post(&self, body: Vec<u8>, signature: &str) -> Result<()>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post(&self, body: Vec<u8>, signature: &str) -> Result<()> {
        (**self).post(body, signature).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn post(&self, body: Vec<u8>, signature: &str) -> Result<()> {
        (**self).post(body, signature).await
    }
}
