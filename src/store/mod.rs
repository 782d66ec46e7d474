//! Dedup store: the record of every article delivered so far

mod dedup;
mod json_file;

pub use dedup::filter_new;
pub use json_file::JsonFileStore;
