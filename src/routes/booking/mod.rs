mod handler;

pub use handler::{cancel_booking, create_booking, get_booking, list_bookings, update_booking};
