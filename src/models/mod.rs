mod cart;
mod item;
mod order;
mod user;

pub use cart::{Cart, CartError, CartOperation, sum_prices};
pub use item::{Item, NewItem};
pub use order::{NewOrder, Order};
pub use user::{NewUser, User};
