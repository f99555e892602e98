pub mod completion;
pub mod error;
pub mod kid;
pub mod progress;
pub mod setting;
pub mod task;
