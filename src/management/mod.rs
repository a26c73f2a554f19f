mod auth;
mod specs;

pub use auth::TokenManager;
pub use specs::SpecError;
pub use specs::SpecManager;
