//! # medipos-session: Billing Session Orchestration
//!
//! One [`BillingSession`] per terminal: it owns the cart, the discount, the
//! customer block, and the held-bill registry, and it is the only thing
//! that talks to the outside world (product lookup, order submission).
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Frontend (POS screens)                                                 │
//! │      │  scan / edit quantity / discount / hold / checkout               │
//! │      ▼                                                                  │
//! │  ★ BillingSession (THIS CRATE) ★                                        │
//! │      │                                │                                 │
//! │      │ sync mutations                 │ async collaborators             │
//! │      ▼                                ▼                                 │
//! │  medipos-core                   ProductLookup / OrderSubmitter          │
//! │  (cart, money, receipts)        (REST client, injected)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership Model
//! The session is **explicitly owned and injected**, never a process-wide
//! singleton: multi-terminal deployments construct one session per
//! terminal and nothing is shared between them. Embedders that need to
//! reach one session from concurrent UI handlers wrap it in
//! `Arc<tokio::sync::Mutex<BillingSession<..>>>` themselves; the session
//! performs no internal locking.

pub mod collaborators;
pub mod config;
pub mod error;
pub mod session;

pub use collaborators::{LookupError, OrderSubmitter, ProductLookup, SubmissionError};
pub use config::StoreConfig;
pub use error::{SessionError, SessionResult};
pub use session::{BillingSession, CheckoutOutcome};
