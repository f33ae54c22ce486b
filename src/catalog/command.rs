pub mod get_book_cmd;
pub mod register_book_cmd;
pub mod remove_book_cmd;
pub mod update_book_cmd;
