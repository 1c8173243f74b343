use std::path::PathBuf;

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection string for the persistence backend. Only the `memory://`
    /// scheme is implemented; the process refuses to start without one.
    pub store_url: String,
    pub bind_addr: String,
    /// Directory where uploaded profile pictures are written.
    pub upload_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let store_url = std::env::var("STORE_URL").expect("STORE_URL must be set!");
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let upload_dir = std::env::var("UPLOAD_DIR")
            .unwrap_or_else(|_| "uploads".to_string())
            .into();

        Self {
            store_url,
            bind_addr: format!("{host}:{port}"),
            upload_dir,
        }
    }
}
