pub mod instance_parser;
mod table;
