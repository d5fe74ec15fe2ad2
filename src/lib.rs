pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod histogram;
pub mod logging;
pub mod pipelines;
pub mod registry;
pub mod storage;
