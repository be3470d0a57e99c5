pub mod convert_service;
pub mod inspect_service;
