pub mod planner;
pub mod schedule;
