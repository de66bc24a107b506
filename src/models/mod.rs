pub mod log;
pub mod route;
pub mod trip;
