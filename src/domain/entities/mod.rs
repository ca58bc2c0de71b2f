pub mod key_category;
pub mod key_record;
pub mod usage_state;
