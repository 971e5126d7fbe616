use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("storage error: {0}")]
    Storage(#[from] nelo_store::StoreError),
}
