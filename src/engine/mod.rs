pub mod grapher;
pub mod state;

pub use grapher::JitterGrapher;
pub use state::GrapherState;
