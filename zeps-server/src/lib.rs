//! ZéPS route planner server.
//!
//! Answers "how do I get from this station to that one on the Nether rail
//! network?", compacting the provider's hop-by-hop path into a short
//! itinerary and suggesting a start from the spawn hub when teleporting
//! there first is faster.

pub mod cache;
pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod stations;
pub mod web;
