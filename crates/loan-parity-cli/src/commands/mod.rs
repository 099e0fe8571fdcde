pub mod payments;
pub mod schedule;
