pub mod array_input;
pub mod input_table;
pub mod inputs;
pub mod inspector;
pub mod layout;
pub mod panel;
pub mod recent_projects;
