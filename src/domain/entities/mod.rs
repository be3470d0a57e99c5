pub mod outline;
pub mod row;
