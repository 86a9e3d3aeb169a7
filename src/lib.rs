//! Credits loyalty points for recycling donations.
//!
//! A donation body `{"user_id": ..., "weight": ...}` is turned into `weight * 10` points
//! (truncated toward zero) and added to the user's `TotalPoints` counter with a single atomic
//! update. Nothing is read back from the store and nothing is deduplicated.

pub mod adapters;
pub mod commands;
pub mod config;
pub mod domain;
pub mod ports;
