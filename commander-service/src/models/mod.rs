pub mod bot;
pub mod code;
pub mod identity;
pub mod task;

pub use bot::Bot;
pub use code::GeneratedCode;
pub use identity::Identity;
pub use task::{Task, TaskResult, TaskStatus};
