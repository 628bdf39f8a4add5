#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod event;
pub mod handler;
pub mod token_source;
pub mod wbxml_source;

pub use config::DecoderConfig;
pub use decoder::PrimitiveDecoder;
pub use error::{DecodeError, ParserError, ProtocolError, TokenError};
pub use event::{ContentSink, EventRecorder, ParseEvent};
pub use handler::PrimitiveContentHandler;
pub use token_source::{ReplaySource, TokenSource};
pub use wbxml_source::WbxmlTokenSource;
