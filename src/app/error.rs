use thiserror::Error;

use super::ipc::IpcError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IPC error: {0}")]
    Ipc(#[from] IpcError),

    #[error("Settings error: {0}")]
    Settings(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_ipc_error_conversion() {
        let app_err: AppError = IpcError::UnknownChannel("file:mount".to_string()).into();
        assert!(matches!(app_err, AppError::Ipc(_)));
        assert_eq!(app_err.to_string(), "IPC error: unregistered channel: file:mount");
    }

    #[test]
    fn test_error_display() {
        let err = AppError::Settings("invalid font size".to_string());
        assert_eq!(err.to_string(), "Settings error: invalid font size");
        assert_eq!(
            AppError::Ipc(IpcError::Disconnected).to_string(),
            "IPC error: peer endpoint disconnected"
        );
    }
}
