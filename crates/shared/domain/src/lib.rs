//! # Domain Models
//!
//! This crate contains pure configuration and domain types with minimal
//! dependencies (`serde` only). Keep it lean: no I/O, networking, or heavy
//! logic—just data and simple helpers.

pub mod config;
pub mod constants;
