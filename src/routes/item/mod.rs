mod handler;
mod model;

pub use handler::{create_item, delete_item, get_item, list_items, put_item};
