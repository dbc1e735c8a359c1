//! Tillpoint client application: hosted-backend access, domain services,
//! the checkout sequencer, and the operator CLI.

pub mod auth;
pub mod backend;
pub mod barcode;
pub mod cli;
pub mod config;
pub mod context;
pub mod domain;
pub mod logging;

#[cfg(test)]
mod test;
