//! Core domain entities.
//!
//! - [`AliasRecord`] - Short alias to original URL mapping
//! - [`QuotaRecord`] / [`QuotaStatus`] - Per-client request quota

pub mod alias;
pub mod quota;

pub use alias::{AliasRecord, GENERATED_ALIAS_LEN};
pub use quota::{QuotaRecord, QuotaStatus};
