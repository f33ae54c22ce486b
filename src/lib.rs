pub mod core;
pub mod books;
pub mod catalog;
pub mod gateway;
pub mod utils;
