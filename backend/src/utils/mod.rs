pub mod jwt;
pub mod slug;
pub mod validation;
pub mod whatsapp;

pub use jwt::{Claims, JwtService};
pub use slug::slugify;
pub use validation::*;
