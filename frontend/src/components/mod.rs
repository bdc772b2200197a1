pub mod data_table;
pub mod layout;
pub mod modal;
