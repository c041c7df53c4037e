use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },
    #[error("referenced record doesn't exist: {constraint}")]
    MissingReference { constraint: String },
    #[error("sqlx error: {0}")]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db_error) = e.as_database_error() {
            let constraint = db_error.constraint().unwrap_or_default().to_string();
            if db_error.is_unique_violation() {
                return Self::UniqueViolation { constraint };
            }
            if db_error.is_foreign_key_violation() {
                return Self::MissingReference { constraint };
            }
        }
        Self::Sqlx(e)
    }
}
