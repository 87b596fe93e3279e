pub mod fs_adapter;
pub mod mongodb;
pub mod parsers;
