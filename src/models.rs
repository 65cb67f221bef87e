pub mod error;
pub mod instruction;
pub mod layout;
pub mod mod_dto;
pub mod paths;
