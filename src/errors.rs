use thiserror::Error;

/// Server start-up errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Environment variable {0} is set but empty")]
    EmptyEnv(String),
    #[error("Environment variable {0} contains invalid Unicode")]
    InvalidEnv(String),
    #[error("Invalid configuration for {name}: {reason}")]
    InvalidConfig { name: String, reason: String },
    #[error("Server error: {0}")]
    Server(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures of the wallet operations. The `Display` output is the message
/// shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("MetaMask not detected. Please install MetaMask.")]
    ProviderUnavailable,
    #[error("Please connect your wallet first.")]
    NotConnected,
    #[error("Invalid recipient address.")]
    InvalidRecipient,
    #[error("Enter a valid ETH amount.")]
    InvalidAmount,
    #[error("Transaction rejected by user in MetaMask.")]
    UserRejected,
    #[error("{0}")]
    Provider(String),
    #[error("Wallet connection failed")]
    ConnectFailed,
    #[error("Failed to refresh balance")]
    RefreshFailed,
    #[error("Transaction failed")]
    SendFailed,
}
