//! Trade stores - sources of windowed trade records

pub mod memory;
pub mod postgres;
pub mod window;

pub use memory::InMemoryTradeStore;
pub use postgres::PgTradeStore;
pub use window::WindowQuery;
