//! CLI command implementations

pub mod capacity;
pub mod decode;
pub mod doctor;
pub mod encode;
pub mod inspect;
pub mod json_output;

mod reporting;
