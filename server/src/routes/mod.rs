pub mod categories;
pub mod posts;
pub mod products;
