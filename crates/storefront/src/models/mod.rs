//! Domain models shared by the stores.

pub mod cart;
pub mod user;

pub use cart::{Cart, CartItem};
pub use user::User;
