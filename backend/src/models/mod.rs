pub mod document;
pub mod users;

pub use document::LunchbotDocument;
pub use users::{Candidate, DirectoryUser, UserStatus};
