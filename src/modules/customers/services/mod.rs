mod phone_validator;

pub use phone_validator::PhoneValidator;
