use store::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("engine error: {0}")]
    Engine(#[from] engine::EngineError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Invalid(String),
}

impl AppError {
    /// The line shown to the user. Technical detail goes to the log; here we
    /// keep the product's voice and never leak transport internals.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AppError::Store(StoreError::NoSession | StoreError::Unauthorized) => {
                "No se ha iniciado sesión. Configura tu token de acceso e intenta de nuevo."
                    .to_string()
            }
            AppError::Store(_) => {
                "Error de conexión con el servidor. Por favor, intenta de nuevo.".to_string()
            }
            AppError::Invalid(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_session_gets_the_blocking_message() {
        let err = AppError::from(StoreError::NoSession);
        assert!(err.user_message().contains("No se ha iniciado sesión"));
    }

    #[test]
    fn store_failures_stay_generic_for_the_user() {
        let err = AppError::from(StoreError::Server("boom".to_string()));
        assert!(!err.user_message().contains("boom"));
    }
}
