pub mod error;
pub mod generation;
pub mod handle;
pub mod local;
pub mod memory;
pub mod preview;
pub mod tree;
pub mod tree_builder;

pub use error::CoreError;
pub use generation::{BuildGeneration, BuildTicket};
pub use handle::{DirectoryHandle, Entry, EntryKind, FileHandle};
pub use local::{LocalDirectory, LocalFile};
pub use memory::{MemoryDirectory, MemoryFile};
pub use preview::{load_preview, Preview};
pub use tree::TreeNode;
pub use tree_builder::{build_tree, TreeBuilder};
