pub mod config;
pub mod db;
pub mod error;

pub use config::{DatabaseSettings, Settings};
pub use db::connection::{build_conninfo, connect, connect_pool, PoolSettings};
pub use db::{ActivityTotal, NewUser, User, UserRole};
pub use error::{DatabaseError, Error};

pub type Result<T> = std::result::Result<T, Error>;
