pub mod alert;
pub mod assessment;
pub mod auth;
pub mod chat;
pub mod directory;
pub mod journal;
pub mod risk;

pub use alert::{AlertDispatcher, AlertRegistry};
pub use assessment::AssessmentService;
pub use auth::AuthService;
pub use chat::ChatService;
pub use directory::DirectoryService;
pub use journal::JournalService;
