//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `SeedState`: Where each seed is in its render, discover, extract cycle

mod seed_state;

pub use seed_state::SeedState;
