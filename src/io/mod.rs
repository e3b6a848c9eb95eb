pub mod loader;
pub mod traits;
pub mod writer;

pub use loader::JsonRecordingLoader;
pub use traits::{ArtifactWriter, RecordingLoader};
pub use writer::FsArtifactWriter;
