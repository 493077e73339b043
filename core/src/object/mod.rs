//! Object storage module
//!
//! The blob store that holds uploaded images, and the upload payload type.

mod dir_store;
mod store;

pub use dir_store::DirObjectStore;
pub use store::{ObjectStore, Upload, IMAGE_CONTENT_TYPE};
