pub mod password;
pub mod token;

pub use password::{MIN_COST, hash_password, verify_password};
pub use token::{Claims, Clock, SystemClock, TOKEN_TTL_DAYS, TokenError, TokenIssuer};

pub mod error_codes {
    pub const VALIDATION_ERROR: i32 = 1000;
    pub const USER_EXISTS: i32 = 1001;
    pub const AUTH_FAILED: i32 = 1002;
    pub const MISSING_TOKEN: i32 = 1003;
    pub const NOT_FOUND: i32 = 1004;
    pub const TOKEN_EXPIRED: i32 = 1006;
    pub const TOKEN_INVALID: i32 = 1007;
    pub const TOKEN_MALFORMED: i32 = 1008;
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const NOT_IMPLEMENTED: i32 = 5001;
}
