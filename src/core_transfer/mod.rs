// Byte streaming and directory listings for the data channel

pub mod listing;
pub mod transfer;

pub use listing::{format_list_line, read_entries, write_listing, ListEntry};
pub use transfer::{open_file, receive_file, send_file, TransferMode};
