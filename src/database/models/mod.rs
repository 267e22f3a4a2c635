pub mod item;
pub mod store;
pub mod user;

pub use item::{ItemEntity, ItemFields};
pub use store::{StoreEntity, StoreView};
pub use user::UserEntity;
