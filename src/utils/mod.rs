pub mod collation;
pub mod file_detection;
pub mod test_helpers;
