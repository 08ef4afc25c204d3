mod handler;

pub use handler::{create_pet, delete_pet, get_pet, list_pets, update_pet};
