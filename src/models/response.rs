use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned when a swap transaction has been broadcast.
#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct SwapResponse {
    pub status: String,
    /// Confirmation signature of the broadcast transaction.
    pub transaction: String,
}

impl SwapResponse {
    pub fn success(signature: String) -> Self {
        Self {
            status: "success".to_string(),
            transaction: signature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body_shape() {
        let body = SwapResponse::success("5Sig".to_string());
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "success", "transaction": "5Sig"})
        );
    }
}
