// History log: bounded persistence, summary views, HTTP handlers.

pub mod handlers;
pub mod store;
pub mod view;

pub use store::HistoryStore;
