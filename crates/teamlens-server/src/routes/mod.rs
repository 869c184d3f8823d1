pub mod chat;
pub mod compare;
pub mod insights;
pub mod me;
pub mod profile;
pub mod quiz;
pub mod team;
