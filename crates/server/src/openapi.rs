use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Person record. Each field may hold any JSON value or be null; stored
/// records may carry extra keys.
#[derive(ToSchema)]
pub struct PersonDoc {
    #[schema(value_type = Object)]
    pub name: Option<serde_json::Value>,
    #[schema(value_type = Object)]
    pub email: Option<serde_json::Value>,
    #[schema(value_type = Object)]
    pub affiliation: Option<serde_json::Value>,
    #[schema(value_type = Object)]
    pub role: Option<serde_json::Value>,
}

#[derive(ToSchema)]
pub struct AddPersonResponseDoc {
    pub message: String,
    pub data: PersonDoc,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::people::add_person,
        crate::routes::people::export_people,
    ),
    components(
        schemas(
            HealthResponse,
            PersonDoc,
            AddPersonResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "people")
    )
)]
pub struct ApiDoc;
