//! Core Kernel - Foundational types and utilities for the claims RPA system
//!
//! This crate provides the building blocks shared by every other crate:
//! - Port error type and marker trait for adapter seams
//! - Calendar date normalization for loosely formatted CSV dates
//! - Common identifiers

pub mod ports;
pub mod temporal;
pub mod identifiers;

pub use ports::{DomainPort, PortError};
pub use temporal::{iso_date_key, parse_calendar_date, TemporalError};
pub use identifiers::BatchId;
