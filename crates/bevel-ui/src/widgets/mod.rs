pub mod button;
pub mod entry;
