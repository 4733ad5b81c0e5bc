//! Shared fixtures for the integration tests
#![allow(dead_code)]

use std::sync::{Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rand::distributions::{Alphanumeric, DistString};
use tokio::time::Instant;

use crpt_gate::{CrptError, Description, Document, Product, Transport, TransportError};

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "crpt_gate=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Stands in for the registration endpoint.
#[derive(Debug)]
pub struct StubTransport {
    status: u16,
    delay: Duration,
    posts: Mutex<Vec<(String, Instant)>>,
}

impl StubTransport {
    pub fn ok() -> Self {
        Self::with_status(200)
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            delay: Duration::ZERO,
            posts: Mutex::new(Vec::new()),
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::ok()
        }
    }

    /// Signatures and arrival times, in the order posts reached the stub
    pub fn posts(&self) -> Vec<(String, Instant)> {
        self.posts.lock().unwrap().clone()
    }

    pub fn signatures(&self) -> Vec<String> {
        self.posts().into_iter().map(|(sig, _)| sig).collect()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn post(&self, _body: Vec<u8>, signature: &str) -> crpt_gate::Result<()> {
        self.posts
            .lock()
            .unwrap()
            .push((signature.to_string(), Instant::now()));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.status != 200 {
            return Err(CrptError::Transport(TransportError::Status(self.status)));
        }
        Ok(())
    }
}

/// Stand-in for a detached signature
pub fn random_signature() -> String {
    Alphanumeric.sample_string(&mut rand::thread_rng(), 64)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn sample_document() -> Document {
    let product = Product::new()
        .with_certificate_document("Certificate123")
        .with_certificate_document_date(date(2024, 1, 23))
        .with_certificate_document_number("Cert123Num")
        .with_owner_inn("1234567890")
        .with_producer_inn("0987654321")
        .with_production_date(date(2024, 1, 23))
        .with_tnved_code("TNVED123")
        .with_uit_code("UIT123")
        .with_uitu_code("UITU123");

    Document::new()
        .with_description(Description::new("1234567890"))
        .with_doc_id("Doc123")
        .with_doc_status("Draft")
        .with_doc_type("LP_INTRODUCE_GOODS")
        .with_import_request(true)
        .with_owner_inn("1234567890")
        .with_participant_inn("1234567890")
        .with_producer_inn("0987654321")
        .with_production_date(date(2024, 1, 23))
        .with_production_type("TypeA")
        .with_product(product)
        .with_reg_date(date(2024, 1, 23))
        .with_reg_number("Reg123")
}
