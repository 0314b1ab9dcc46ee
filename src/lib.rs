pub mod backend;
pub mod common;
pub mod parser;
pub mod player;
pub mod source;

pub use backend::{BackendKind, Capabilities, Instance};
pub use common::models::{Profile, Video};
pub use parser::errors::ParseError;
pub use parser::models::{Resolution, Stream, StreamKind, StreamSource};
pub use parser::stream_selector::StreamSelector;
