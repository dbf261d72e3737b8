//! Pax8: credential profiles and ad-hoc requests for the Pax8 API
//!
//! Stores named client-credential profiles with one active default, and sends
//! single authenticated requests to the Pax8 REST API, printing the response
//! as indented JSON.

pub mod account;
pub mod api;
pub mod cli;
pub mod error;
pub mod logging;
