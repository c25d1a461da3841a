use axum::Router;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{DrugLookupResult, MedicineRecord, ScanResponse},
    AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::scan::scan_medicine,
    ),
    components(
        schemas(MedicineRecord, DrugLookupResult, ScanResponse)
    ),
    tags(
        (name = "scan", description = "Medicine label scanning endpoints"),
    ),
    info(
        title = "Medscan API",
        version = "0.1.0",
        description = "Medicine label scanning and OCR field extraction API",
    )
)]
pub struct ApiDoc;

pub fn create_swagger_router() -> Router<Arc<AppState>> {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
