//! Presenters - render refresh passes for humans or scripts

pub mod json;
pub mod table;

pub use json::JsonPresenter;
pub use table::{TableOptions, TablePresenter};
