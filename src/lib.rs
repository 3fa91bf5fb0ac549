pub mod bookmark;
pub mod error;
pub mod import;
pub mod math;
pub mod mesh;
pub mod picking;
pub mod quiz;
pub mod selection;
pub mod tessellation;

pub use error::{MeshmarkError, Result};
