pub mod registration;
pub mod review;

pub use registration::{GuestSnapshot, Registration, RegistrationId, RegistrationStatus};
pub use review::Review;
