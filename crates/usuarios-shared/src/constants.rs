//! Application-wide constants

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BCRYPT_COST: u32 = 10;
pub const DEFAULT_PHOTO_URL_PREFIX: &str = "/perfis";
pub const DEFAULT_PHOTO_DIR: &str = "public/perfis";
pub const PHONE_MIN_DIGITS: usize = 10;
pub const PHONE_MAX_DIGITS: usize = 11;
pub const STATUS_ACTIVE: i16 = 1;
pub const STATUS_INACTIVE: i16 = 0;
