pub mod config;
pub mod directory;
pub mod error;
pub mod member;
pub mod quiz;
pub mod roster;
pub mod store;

pub use directory::Directory;
pub use error::{Result, TeamlensError};
pub use member::TeamMember;
