use thiserror::Error;

pub type Result<T> = std::result::Result<T, WalletError>;

/// Failures raised by a ledger repository implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("duplicate key: {0}")]
    Duplicate(String),
    #[error("key not found: {0}")]
    NotFound(String),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("storage backend error: {0}")]
    Backend(String),
    #[cfg(feature = "storage-rocksdb")]
    #[error("rocksdb error: {0}")]
    RocksDb(#[from] rocksdb::Error),
}

/// Failures raised by the external payment provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("provider rejected the movement: {0}")]
    Rejected(String),
    #[error("provider unreachable: {0}")]
    Unavailable(String),
}

/// The domain error taxonomy surfaced to callers.
///
/// `InvalidParams` is the 4xx-equivalent family (business-rule violations,
/// never retried automatically); the remaining variants are 5xx-equivalent
/// and keep the collaborator failure as their source, labelled with the
/// operation that failed.
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("{context}")]
    Get {
        context: String,
        #[source]
        source: StoreError,
    },
    #[error("{context}")]
    Create {
        context: String,
        #[source]
        source: StoreError,
    },
    #[error("{context}")]
    Update {
        context: String,
        #[source]
        source: StoreError,
    },
    #[error("{context}")]
    ThirdParty {
        context: String,
        #[source]
        source: ProviderError,
    },
    #[error("{context}")]
    Internal {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl WalletError {
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }

    pub fn get(source: StoreError, context: &str) -> Self {
        Self::Get {
            context: context.to_string(),
            source,
        }
    }

    pub fn create(source: StoreError, context: &str) -> Self {
        Self::Create {
            context: context.to_string(),
            source,
        }
    }

    pub fn update(source: StoreError, context: &str) -> Self {
        Self::Update {
            context: context.to_string(),
            source,
        }
    }

    pub fn third_party(source: ProviderError, context: &str) -> Self {
        Self::ThirdParty {
            context: context.to_string(),
            source,
        }
    }

    pub fn internal(source: impl std::error::Error + Send + Sync + 'static, context: &str) -> Self {
        Self::Internal {
            context: context.to_string(),
            source: Box::new(source),
        }
    }
}
