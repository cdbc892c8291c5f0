pub type OpcfxResult<T> = Result<T, OpcfxError>;

#[derive(thiserror::Error, Debug)]
pub enum OpcfxError {
    #[error("layout error: {0}")]
    Layout(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OpcfxError {
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    pub fn server(msg: impl Into<String>) -> Self {
        Self::Server(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
