pub mod parse_command;
pub mod print;
