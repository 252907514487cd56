mod cart;
pub mod order;

pub use self::cart::CartService;
