pub mod exports;
pub mod message;
pub mod templates;
