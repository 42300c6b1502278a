pub mod error;
pub mod reflect;
