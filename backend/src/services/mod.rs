pub mod directory;

pub use directory::{find_user, UserDirectory};
