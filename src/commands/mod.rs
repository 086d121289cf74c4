pub mod backends;
pub mod fetch;
pub mod new;
