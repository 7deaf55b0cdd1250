pub mod access;
pub mod directory;
pub mod providers;
pub mod scheduler;
pub mod stores;

pub use access::{AccessControl, AccessError, AuthContext};
pub use directory::{DirectoryError, IdentityDirectory};
pub use providers::{fallback_code, CodeGenerator, ProviderError};
pub use scheduler::TaskScheduler;
pub use stores::{BotStore, CodeStore, TaskStore};
