pub mod item;
pub mod store;
pub mod user;

pub use item::{ItemRepository, PgItemRepository};
pub use store::{PgStoreRepository, StoreRepository};
pub use user::{PgUserRepository, UserRepository};
