//! Request and response DTOs.

pub mod request;
pub mod response;

pub use request::{DownloadQuery, ListFilesQuery, UploadQuery};
pub use response::{ApiResponse, HealthResponse, MessageResponse, TokenValidationResponse};
