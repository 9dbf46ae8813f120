pub mod document;
pub mod payloads;
