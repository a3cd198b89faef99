//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, copies, genres, health, summary};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Local Library API",
        version = "0.1.0",
        description = "Library catalog REST API: books, authors, genres and book copies",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/catalog", description = "Catalog API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Summary
        summary::get_summary,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::book_create_form,
        books::book_edit_form,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        // Copies
        copies::list_copies,
        copies::get_copy,
        copies::create_copy,
        copies::update_copy,
        copies::delete_copy,
        copies::copy_form,
    ),
    components(
        schemas(
            // Authors
            crate::models::author::Author,
            crate::models::author::AuthorForm,
            crate::models::author::AuthorDetails,
            // Genres
            crate::models::genre::Genre,
            crate::models::genre::GenreForm,
            crate::models::genre::GenreDetails,
            crate::models::genre::GenreOption,
            // Books
            crate::models::book::Book,
            crate::models::book::BookForm,
            crate::models::book::BookListItem,
            crate::models::book::BookDetails,
            crate::models::book::BookFormContext,
            // Copies
            crate::models::book_copy::BookCopy,
            crate::models::book_copy::BookCopyForm,
            crate::models::book_copy::CopyListItem,
            crate::models::book_copy::CopyDetails,
            crate::models::book_copy::CopyStatus,
            // Misc
            crate::services::summary::Summary,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "summary", description = "Catalog counts"),
        (name = "books", description = "Book management"),
        (name = "authors", description = "Author management"),
        (name = "genres", description = "Genre management"),
        (name = "copies", description = "Physical copy management")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router serving the OpenAPI document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
