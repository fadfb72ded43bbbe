//! Helpers for recording public form submissions.
//!
//! Extracts who submitted a form: client address, coarse device, OS and
//! browser from the `User-Agent` header, and a location label.

mod client;

pub use client::{ClientInfo, DeviceInfo, client_ip, location_for};
