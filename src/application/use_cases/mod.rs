pub mod key_usage;
