pub mod check;
pub mod directory;
pub mod roster;
pub mod serve;
