use axum::{extract::State, Extension, Form, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::Catalog;
use crate::error::{AppError, AppResult};
use crate::middleware::RequestId;
use crate::models::{BookRecord, ChartBar, EnrichedBook};
use crate::services::{clean_rating_isbn, recommend, sample_popular};

use super::AppState;

// Request/Response types

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub catalog_loaded_at: DateTime<Utc>,
    pub catalog_size: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HomeResponse {
    pub popular_books: Vec<EnrichedBook>,
    pub top_books_chart: Vec<ChartBar>,
    pub top_authors_chart: Vec<ChartBar>,
}

/// Form posted when a reader picks a book on the homepage
#[derive(Debug, Deserialize)]
pub struct BookSelection {
    #[serde(default)]
    pub book_isbn: String,
    #[serde(default)]
    pub book_title: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub selected_book: String,
    pub book_title: String,
    pub recommendations: Vec<BookRecord>,
    pub popular_books: Vec<EnrichedBook>,
}

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        catalog_loaded_at: state.catalog.loaded_at(),
        catalog_size: state.catalog.enriched().len(),
    })
}

/// Homepage: a fresh popular-books sample plus both charts
pub async fn home(State(state): State<AppState>) -> Json<HomeResponse> {
    let catalog = &state.catalog;
    Json(HomeResponse {
        popular_books: popular_books(catalog, state.settings.popular_sample_size),
        top_books_chart: catalog.top_books_chart().to_vec(),
        top_authors_chart: catalog.top_authors_chart().to_vec(),
    })
}

/// Homepage form submission: recommendations for the selected book
///
/// An ISBN that cleans down to nothing is treated like any unknown ISBN and
/// yields an empty recommendation list.
pub async fn select_book(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Form(selection): Form<BookSelection>,
) -> AppResult<Json<SelectionResponse>> {
    let isbn = clean_rating_isbn(&selection.book_isbn);

    tracing::info!(
        request_id = %request_id,
        isbn = %isbn,
        title = %selection.book_title,
        "Processing book selection"
    );

    let recommendations = if isbn.is_empty() {
        Vec::new()
    } else {
        recommendations_for(&state, isbn.clone(), state.settings.recommendation_count).await?
    };

    tracing::info!(
        request_id = %request_id,
        count = recommendations.len(),
        "Recommendations computed"
    );

    Ok(Json(SelectionResponse {
        selected_book: isbn,
        book_title: selection.book_title,
        recommendations,
        popular_books: popular_books(&state.catalog, state.settings.popular_sample_size),
    }))
}

fn popular_books(catalog: &Catalog, k: usize) -> Vec<EnrichedBook> {
    sample_popular(catalog.enriched(), k, &mut rand::thread_rng())
}

/// Runs the recommender on the blocking pool; it scans every rating of the
/// seed's fans.
async fn recommendations_for(
    state: &AppState,
    isbn: String,
    n: usize,
) -> AppResult<Vec<BookRecord>> {
    let catalog = state.catalog.clone();
    tokio::task::spawn_blocking(move || recommend(&isbn, catalog.ratings(), catalog.books(), n))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))
}
