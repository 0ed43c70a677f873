pub mod catalog;
pub mod job;
pub mod rank;
