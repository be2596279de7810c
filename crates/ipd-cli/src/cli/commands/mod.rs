mod get;
mod info;

pub use get::run_get;
pub use info::run_info;
