//! RegistroService (record store) and RegistroValidator (form rules).

mod crud;
mod validation;
pub use crud::RegistroService;
pub use validation::{compute_age, is_adult, is_valid_name, is_valid_national_id, Field, FieldErrors, RegistroValidator, ADULT_AGE};
