use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct BookDoc {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    /// `YYYY-MM-DD`
    pub publication_date: String,
}

#[derive(ToSchema)]
pub struct BookPayloadDoc {
    pub title: String,
    pub author: String,
    pub isbn: String,
    /// `YYYY-MM-DD`
    pub publication_date: String,
}

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::books::list,
        crate::routes::books::create,
        crate::routes::books::update,
        crate::routes::books::delete,
    ),
    components(
        schemas(
            HealthResponse,
            BookDoc,
            BookPayloadDoc,
            MessageDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "books")
    )
)]
pub struct ApiDoc;
