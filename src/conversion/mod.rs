// Export all modules
pub mod converter;
pub mod download;
pub mod naming;
pub mod policy;
pub mod reader;
pub mod session;
pub mod source;

// Re-export key types for convenience
pub use converter::Converter;
pub use naming::AcceptMode;
pub use policy::Policy;
pub use reader::{spawn_read, ReadDone};
pub use session::{Completion, Session, State};
pub use source::SourceFile;
