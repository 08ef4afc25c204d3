mod handler;

pub use handler::{create_service, delete_service, get_service, list_services, update_service};
