//! Record validation core for the donation coordination backend.
//!
//! Candidate records (contacts, donation posts, pickup requests, accounts)
//! are validated against declarative field schemas, normalised with their
//! defaults filled in, and handed to a persistence adapter that assigns
//! identifiers and enforces uniqueness.

pub mod domain;
pub mod outbound;
pub mod telemetry;
