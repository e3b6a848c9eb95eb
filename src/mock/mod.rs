//! Deterministic stand-ins for the loader, writer and renderer

pub mod loader;
pub mod renderer;
pub mod writer;

pub use loader::FakeRecordingLoader;
pub use renderer::{FakeChartRenderer, FAKE_PNG};
pub use writer::{MemoryWriter, WrittenArtifact};
