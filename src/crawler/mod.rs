//! Crawler module for seed processing
//!
//! This module contains the core crawling logic, including:
//! - The visited set that keeps every URL to a single extraction
//! - The per-seed render, discover, extract cycle
//! - Overall crawl coordination and shutdown

mod coordinator;
mod visited;

pub use coordinator::{run_crawl, Crawler};
pub use visited::VisitedSet;
