//! Database module (PostgreSQL and in-memory adapters)

pub mod connection;
pub mod memory;
pub mod postgres;

pub use connection::create_pool;
pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;
