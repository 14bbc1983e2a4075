//! Segmented synthetic banking data: an account table and a
//! transaction ledger, generated from one seeded stream and written
//! to CSV.

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod profile_sampler;
pub mod record;
pub mod rng;
pub mod segment;
pub mod transaction_synthesizer;
pub mod types;
