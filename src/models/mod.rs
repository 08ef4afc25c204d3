mod booking;
mod pet;
mod service;
mod user;

pub use booking::{Booking, BookingStatus, CreateBookingRequest, UpdateBookingRequest};
pub use pet::{CreatePetRequest, PET_COLUMNS, Pet, PetField, UpdatePetRequest};
pub use service::{CreateServiceRequest, Service, ServiceCategory, UpdateServiceRequest};
pub use user::{
    CreateUserRequest, LoginRequest, LoginResponse, MIN_PASSWORD_LEN, UnknownRole, User,
    UserRole,
};
