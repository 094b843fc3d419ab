//! Implementations of ports and outbound tool integrations.

pub mod machine;
pub mod process;

pub use machine::MachineTool;
pub use process::ProcessExecutor;
