//! CLI command implementations

pub mod export;
pub mod import;
pub mod init;
pub mod sync;
pub mod validate;
