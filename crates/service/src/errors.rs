use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("book with the same title, author, isbn and publication date already exists")]
    Duplicate,
    #[error("book {0} not found")]
    NotFound(i32),
    #[error("database error: {0}")]
    Db(String),
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
            ModelError::Duplicate => ServiceError::Duplicate,
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ModelError::from(e).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_keep_their_category() {
        assert!(matches!(ServiceError::from(ModelError::Duplicate), ServiceError::Duplicate));
        assert!(matches!(
            ServiceError::from(ModelError::Validation("title required".into())),
            ServiceError::Validation(m) if m == "title required"
        ));
        assert!(matches!(ServiceError::from(ModelError::Db("boom".into())), ServiceError::Db(_)));
    }

    #[test]
    fn connection_errors_are_db_errors() {
        let err = ServiceError::from(sea_orm::DbErr::Conn(sea_orm::RuntimeErr::Internal("refused".into())));
        assert!(matches!(err, ServiceError::Db(_)));
    }
}
