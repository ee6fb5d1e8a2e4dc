//! Error handling

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("cannot read hotel catalog: {0}")]
    Catalog(#[from] csv::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
}
