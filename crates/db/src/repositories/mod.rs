//! Repositories: one unit struct with async SQL functions per table.

mod catalog_repo;
mod rating_repo;
mod resource_repo;
mod roadmap_repo;
mod session_repo;
mod subject_repo;
mod user_repo;

pub use catalog_repo::{BranchRepo, ProgramRepo, SemesterRepo, YearRepo};
pub use rating_repo::RatingRepo;
pub use resource_repo::ResourceRepo;
pub use roadmap_repo::RoadmapRepo;
pub use session_repo::SessionRepo;
pub use subject_repo::SubjectRepo;
pub use user_repo::UserRepo;
