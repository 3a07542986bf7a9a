#![doc = "jenkins-sync-core: resource reconciliation core for Jenkins."]

//! This crate contains the resource-addressing and reconciliation logic for
//! declaring Jenkins objects (folders, jobs, views, credentials) and converging
//! them against a live server. Transport, retries and the outer IaC surfaces
//! are collaborator concerns and are not included here.
//!
//! # Usage
//! Implement [`contract::JenkinsClient`] for your transport, then drive the
//! create/read/update/delete functions under [`resources`].

pub mod config;
pub mod contract;
pub mod credentials;
pub mod diff;
pub mod document;
pub mod error;
pub mod paths;
pub mod resources;
pub mod template;
