//! Fetch-a-Donut - Conference Coupon Chat Agent
//!
//! This crate implements a small conversational agent: it greets a visitor,
//! collects a donut story (or a stated preference), has it judged by a
//! hosted language model, and returns a redeemable coupon code.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
