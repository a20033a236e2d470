pub mod codec;
pub mod repositories;
pub mod services;
