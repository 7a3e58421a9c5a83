pub mod error;
pub mod task;

pub use error::TodoError;
pub use task::Task;
