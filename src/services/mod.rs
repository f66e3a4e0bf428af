pub mod blog_service;
pub mod contact_service;
pub mod profile_service;
pub mod project_service;
pub mod skill_service;
pub mod status_service;

pub use blog_service::BlogService;
pub use contact_service::{ContactReceipt, ContactService};
pub use profile_service::ProfileService;
pub use project_service::ProjectService;
pub use skill_service::SkillService;
pub use status_service::StatusService;
