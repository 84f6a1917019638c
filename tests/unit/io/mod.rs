pub mod image;
pub mod visualization;
