//! # Domain Models
//!
//! Pure types shared by every Roster crate: configuration, constants and the slice registry.
//! Keep it lean: no I/O, networking, or heavy logic, just data and simple helpers.

pub mod config;
pub mod constants;
pub mod slices;
