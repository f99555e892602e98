pub mod chore_repository;
pub mod completion_repository;
pub mod extra_task_repository;
pub mod kid_repository;
pub mod setting_repository;

pub use chore_repository::ChoreRepository;
pub use completion_repository::CompletionRepository;
pub use extra_task_repository::ExtraTaskRepository;
pub use kid_repository::KidRepository;
pub use setting_repository::SettingRepository;
