mod handler;
mod model;

pub use handler::{create_store, delete_store, get_store, list_stores};
