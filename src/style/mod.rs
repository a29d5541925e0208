pub mod color;
pub mod paint;
