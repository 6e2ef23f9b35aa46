//! Fetch strategies, one per popularity category
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  FetchStrategy::{Viewed, Emailed, Shared}                   │
//! │    - Plain value: category (+channel) and time window       │
//! │    - Builds exactly one RequestDescriptor                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  RequestExecutor                                            │
//! │    - Resolves URL, calls the Transport                      │
//! │    - Decodes ArticlesResponse or classifies the failure     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Strategies hold no connection or session and can be rebuilt freely.
//! The state container swaps them at runtime and uses equality only to
//! recognise a reselection of the current strategy.
//!
//! # Example
//!
//! ```ignore
//! use most_popular::{Category, FetchStrategy, TimeWindow};
//!
//! let strategy = FetchStrategy::new(Category::Emailed, TimeWindow::OneDay);
//! let articles = strategy.fetch(&client).await?;
//! ```

mod types;

pub use types::{FetchStrategy, API_KEY_PARAM};
