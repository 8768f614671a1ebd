pub mod config;
pub mod erp_domain;
pub mod error;
pub mod format;
pub mod latest;
pub mod orm;
pub mod rpc;

pub use error::GalleryError;
