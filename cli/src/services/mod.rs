// docprep-cli/src/services/mod.rs

pub mod azure_prep;
pub mod document_collector;
pub mod image_preprocessor;

pub use azure_prep::AzurePrep;
pub use document_collector::DocumentCollector;
pub use image_preprocessor::ImagePreprocessor;
