//! Repository layer.
//!
//! Each repository is a zero-sized struct providing typed async accessors
//! that accept the record store (`&dyn KvStore`) as the first argument.
//! Keys come from [`learnpath_core::keys`].

pub mod achievement_repo;
pub mod chat_repo;
pub mod profile_repo;
pub mod progress_repo;
pub mod roadmap_repo;
pub mod submission_repo;

pub use achievement_repo::AchievementRepo;
pub use chat_repo::ChatRepo;
pub use profile_repo::ProfileRepo;
pub use progress_repo::ProgressRepo;
pub use roadmap_repo::RoadmapRepo;
pub use submission_repo::SubmissionRepo;
