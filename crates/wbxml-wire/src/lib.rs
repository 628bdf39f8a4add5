#![warn(clippy::pedantic)]

pub mod charset;
pub mod code_page;
pub mod error;
pub mod header;
pub mod mb_uint;
pub mod reader;
pub mod string_table;
pub mod token;

pub use charset::Charset;
pub use code_page::{AttrStart, CodePages};
pub use error::WireError;
pub use header::{PublicId, WbxmlHeader};
pub use reader::ByteReader;
pub use string_table::StringTable;
