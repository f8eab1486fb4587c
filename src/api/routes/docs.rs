//! Serves the generated OpenAPI document.

use actix_web::{get, web, HttpResponse};
use utoipa::OpenApi;

use crate::openapi::ApiDoc;

#[get("/api-docs/openapi.json")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(openapi_json);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_openapi_document_lists_swap_path() {
        let app = test::init_service(App::new().configure(init)).await;
        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api-docs/openapi.json")
                .to_request(),
        )
        .await;

        assert_eq!(response.status().as_u16(), 200);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert!(body["paths"].get("/").is_some());
        assert!(body["paths"].get("/health").is_some());
    }
}
