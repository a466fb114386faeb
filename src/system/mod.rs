pub mod locator;
pub mod memory;
pub mod procfs;
pub mod source;
pub mod static_table;
