pub mod analysis;
pub mod file_processor;
pub mod upload_store;
