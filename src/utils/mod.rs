//! Helper functions used across the application:
//!
//! - [`code_generator`] - Random alias generation
//! - [`url_validator`] - Structural URL validation
//! - [`client_ip`] - Client identity for quota accounting

pub mod client_ip;
pub mod code_generator;
pub mod url_validator;
