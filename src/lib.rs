use std::sync::Arc;

use config::Config;
use database::{PetRepository, UserRepository};
use services::AuthService;
use utils::TokenIssuer;

pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod models;
pub mod router;
pub mod routes;
pub mod services;
pub mod utils;

pub use router::create_router;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub auth: Arc<AuthService>,
    pub users: Arc<dyn UserRepository>,
    pub pets: Arc<dyn PetRepository>,
}

impl AppState {
    pub fn new(
        config: Config,
        users: Arc<dyn UserRepository>,
        pets: Arc<dyn PetRepository>,
    ) -> Self {
        let tokens = TokenIssuer::new(&config.jwt_secret);
        Self::with_tokens(config, users, pets, tokens)
    }

    pub fn with_tokens(
        config: Config,
        users: Arc<dyn UserRepository>,
        pets: Arc<dyn PetRepository>,
        tokens: TokenIssuer,
    ) -> Self {
        let auth = Arc::new(AuthService::new(users.clone(), tokens, config.bcrypt_cost));
        Self {
            config,
            auth,
            users,
            pets,
        }
    }
}
