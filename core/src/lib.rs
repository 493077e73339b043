//! Core library for the task gateway
//!
//! This crate contains the gateway's business logic, including:
//! - The task record and its id scheme
//! - The four resource seams (object store, task table, queue, topic)
//! - Filesystem implementations of each seam for local runs
//! - Resource provisioning and the task service

pub mod channel;
pub mod error;
pub mod gateway;
pub mod object;
pub mod provision;
pub mod task;

pub use error::Error;
pub use gateway::TaskGateway;
pub use provision::Provisioned;
pub type Result<T> = std::result::Result<T, Error>;
