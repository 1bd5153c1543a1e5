/// Error handling middleware that maps domain errors to HTTP responses
pub mod error_handling;
