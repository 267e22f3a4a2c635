mod handler;
mod model;

pub use handler::{delete_user, get_user, login, logout, refresh_token, register};
