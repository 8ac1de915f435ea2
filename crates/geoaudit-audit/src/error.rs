use thiserror::Error;

/// Failures of the audit pipeline. Report parsing never fails, so only
/// extraction and generation appear here.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("extraction failed: {0}")]
    Fetch(#[from] geoaudit_browser::FetchError),

    #[error("report generation failed: {0}")]
    Llm(#[from] geoaudit_llm::LlmError),
}

pub type Result<T> = std::result::Result<T, AuditError>;
