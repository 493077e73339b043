//! Task module
//!
//! This module contains the task record and the task table seam.

mod file_store;
mod model;
mod repository;

pub use file_store::FileTaskStore;
pub use model::*;
pub use repository::TaskRepository;
