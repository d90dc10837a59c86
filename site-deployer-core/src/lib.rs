#![doc = "site-deployer-core: upload-and-invalidate pipeline for static site deployment."]

//! This crate holds all deployment logic for site-deployer: mapping a local
//! directory tree onto bucket keys, uploading each file as a public web object,
//! and deriving the CDN invalidation paths for everything that was uploaded.
//! Concrete storage and CDN clients live in the `site-deployer` crate; here they
//! are only contracts.
//!
//! # Usage
//! Build a [`deploy::DeploySession`] from a [`config::DeployConfig`] and three
//! collaborators, then call [`deploy::DeploySession::run`].

pub mod config;
pub mod contract;
pub mod deploy;
pub mod error;
pub mod flush;
pub mod invalidation;
pub mod ledger;
pub mod mime;
pub mod path;
pub mod upload;
pub mod walk;

pub use error::{DeployError, Result};
