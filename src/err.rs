#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}
