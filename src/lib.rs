//! Booking inquiries for a vacation rental: validation, a single pending
//! record write per inquiry, and the booking page that drives it.

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod form;
pub mod handlers;
pub mod models;
pub mod store;
pub mod submitter;
pub mod views;
