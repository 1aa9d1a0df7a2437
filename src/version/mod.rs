//! Version checking layer for the installed SDK
//!
//! This module locates the installed SDK version, fetches the latest
//! published release and orders the two.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Locator   │────▶│   Checker   │◀────│   Fetcher   │
//! │ (marker)    │     │  (compare)  │     │  (latest)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │   Semver    │     │  Fetchers   │
//!                     │(version cmp)│     │  (GitHub)   │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`locator`]: Marker file and version record discovery
//! - [`checker`]: Version comparison and outcome determination
//! - [`fetcher`]: Fetcher trait and release descriptor parsing
//! - [`fetchers`]: Concrete fetcher implementations (GitHub Releases)
//! - [`error`]: Error types for locating, fetching and comparing
//! - [`semver`]: Numeric version ordering

pub mod checker;
pub mod error;
pub mod fetcher;
pub mod fetchers;
pub mod locator;
pub mod semver;
