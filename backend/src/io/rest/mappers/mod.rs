//! Conversions from domain models to the `shared` DTOs

pub mod completion_mapper;
pub mod kid_mapper;
pub mod progress_mapper;
pub mod setting_mapper;
pub mod task_mapper;

pub use completion_mapper::CompletionMapper;
pub use kid_mapper::KidMapper;
pub use progress_mapper::ProgressMapper;
pub use setting_mapper::SettingMapper;
pub use task_mapper::TaskMapper;
