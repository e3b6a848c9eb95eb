pub mod recording;
pub mod result;

pub use recording::{Event, Recording, Stream, StreamMetadata};
pub use result::StreamResult;
