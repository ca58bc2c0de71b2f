pub mod clipboard;
pub mod http;
pub mod local_store;
pub mod persistence;
