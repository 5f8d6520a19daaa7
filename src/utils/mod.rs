//! Utility modules for daykit.
//!
//! # Available Utilities
//!
//! - [`datetime`] - Date and time formatting, parsing, and differences
//! - [`text`] - Capitalization, number abbreviation and ticket codes
//!
//! Everything here is a pure function of its inputs. Helpers that need the
//! current instant have a variant taking it explicitly.

pub mod datetime;
pub mod text;
