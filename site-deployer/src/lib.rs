pub mod cli;
pub mod cloudfront;
pub mod load_config;
pub mod s3;

pub use cli::{run, Cli, Commands};
