#![warn(clippy::pedantic)]

pub mod error;
pub mod primitive;
pub mod property;
pub mod record;

pub use error::ModelError;
pub use primitive::Primitive;
pub use property::{Property, PropertyBuilder, PropertyParam};
pub use record::Record;
