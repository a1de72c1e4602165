pub mod builder;
pub mod cache;
pub mod function;
pub mod image;
pub mod movie;
pub mod remap;
