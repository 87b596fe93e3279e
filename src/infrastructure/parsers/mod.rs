pub mod json_parser;

pub use json_parser::{parse_json, JsonParser};
