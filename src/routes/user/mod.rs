mod handler;

pub use handler::{get_profile, login, register, update_profile};
