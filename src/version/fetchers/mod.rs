//! Fetcher implementations for release descriptors

pub mod github;

pub use github::GitHubReleaseFetcher;
