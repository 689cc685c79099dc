//! Stairwell - backend tooling for the Single Stair NC advocacy campaign.
//!
//! Two flows share this crate: feed ingestion (pull housing/urbanism news
//! from RSS/Atom feeds into the campaign's content store, deduplicated by
//! provider GUID) and representative outreach (free-text NC address to
//! legislators, templated messages, simulated dispatch, engagement log).

pub mod civic;
pub mod cli;
pub mod config;
pub mod geocode;
pub mod ingest;
pub mod models;
pub mod outreach;
pub mod store;
pub mod utils;
