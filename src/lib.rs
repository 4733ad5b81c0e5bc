//! Rate-limited client for the document registration API.
//!
//! A [`SubmissionGate`] serializes a goods-introduction [`Document`], attaches
//! the caller's detached signature as the `Signature` header and POSTs it to
//! the registration endpoint, admitting at most `request_limit` submissions per
//! window of one [`TimeUnit`]. Callers over the limit wait, first come first
//! served, until the next window opens.
//!
//! ```rust,no_run
//! use crpt_gate::{Description, Document, SubmissionGate, TimeUnit};
//!
//! # async fn example() -> crpt_gate::Result<()> {
//! let gate = SubmissionGate::new(TimeUnit::Seconds, 5)?;
//! let document = Document::new()
//!     .with_description(Description::new("1234567890"))
//!     .with_doc_type("LP_INTRODUCE_GOODS")
//!     .with_import_request(true);
//!
//! gate.submit(&document, "signature").await?;
//! gate.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod error;
pub mod gate;
pub mod limiters;
pub mod settings;
pub mod transport;

pub use document::{Description, Document, Product};
pub use error::{CrptError, Result, TransportError};
pub use gate::{GateStats, SubmissionGate};
pub use limiters::GateState;
pub use settings::{GateSettings, TimeUnit, TransportSettings};
pub use transport::{HttpTransport, Transport};
