use crate::errors::ApiError;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

pub const MAX_QUERY_LENGTH: usize = 4000;
pub const MAX_USER_ID_LENGTH: usize = 255;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct GenerateForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub user_id: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 4000)]
    pub query: String,
}

impl GenerateForm {
    pub fn validated(self) -> Result<Self, ApiError> {
        self.validate()
            .map_err(|errors| ApiError::Validation(format!("Invalid request: {}", errors)))?;
        not_blank("user_id", &self.user_id)?;
        not_blank("query", &self.query)?;
        Ok(self)
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct HistoryQuery {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub user_id: String,
}

impl HistoryQuery {
    pub fn validated(self) -> Result<Self, ApiError> {
        self.validate()
            .map_err(|errors| ApiError::Validation(format!("Invalid request: {}", errors)))?;
        not_blank("user_id", &self.user_id)?;
        Ok(self)
    }
}

fn not_blank(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
