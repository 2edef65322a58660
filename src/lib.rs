//! DevChat client library.
//!
//! A polling chat client: a backend thread keeps a message store in sync on
//! a fixed interval while the egui front end renders the latest snapshot.

pub mod app;
pub mod backend;
pub mod client;
pub mod config;
pub mod message;
pub mod protocol;
pub mod session;
pub mod transport;
pub mod ui;
pub mod validation;
pub mod view;

#[cfg(test)]
mod backend_tests;
