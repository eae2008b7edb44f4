pub mod rosters;
pub mod teams;
