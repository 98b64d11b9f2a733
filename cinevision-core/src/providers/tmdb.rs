use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use cinevision_model::{
    CastMember, ImagePath, MediaDetails, MediaKey, MediaKind, SearchPage, SearchResult,
};

use super::traits::{CatalogProvider, ProviderError};

const TMDB_API_BASE: &str = "https://api.themoviedb.org/3";
const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// How many credited cast members survive ingestion.
const CAST_LIMIT: usize = 5;

/// TMDB-backed catalog provider.
///
/// Searches go through `/search/multi`; enrichment hits the per-kind detail
/// endpoint with credits appended to the same round-trip.
pub struct TmdbProvider {
    api_key: String,
    client: Arc<Client>,
}

impl TmdbProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: Arc::new(Client::new()),
        }
    }
}

#[async_trait]
impl CatalogProvider for TmdbProvider {
    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, ProviderError> {
        let url = format!("{TMDB_API_BASE}/search/multi");
        let page_param = page.to_string();
        let params = [
            ("api_key", self.api_key.as_str()),
            ("query", query),
            ("include_adult", "false"),
            ("language", "en-US"),
            ("page", page_param.as_str()),
        ];

        tracing::debug!(query, page, "TMDB search request");
        let response = self.client.get(&url).query(&params).send().await?;
        if let Some(error) = status_error(response.status()) {
            return Err(error);
        }

        let body: TmdbSearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let received = body.results.len();
        let results: Vec<SearchResult> = body.results.into_iter().filter_map(ingest_entry).collect();
        tracing::info!(
            query,
            page,
            kept = results.len(),
            received,
            "TMDB search completed"
        );

        Ok(SearchPage {
            results,
            page: body.page.unwrap_or(page),
            total_pages: body.total_pages.unwrap_or(1),
        })
    }

    async fn details(&self, key: MediaKey) -> Result<MediaDetails, ProviderError> {
        let url = format!("{TMDB_API_BASE}/{}/{}", key.kind.as_provider_tag(), key.id);
        let params = [
            ("api_key", self.api_key.as_str()),
            ("language", "en-US"),
            ("append_to_response", "credits"),
        ];

        tracing::debug!(%key, "TMDB details request");
        let response = self.client.get(&url).query(&params).send().await?;
        if let Some(error) = status_error(response.status()) {
            return Err(error);
        }

        let body: TmdbDetailsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        tracing::info!(%key, "TMDB details completed");
        Ok(ingest_details(body))
    }

    fn name(&self) -> &'static str {
        "TMDB"
    }

    fn image_base_url(&self) -> &str {
        TMDB_IMAGE_BASE
    }
}

fn status_error(status: StatusCode) -> Option<ProviderError> {
    if status == 401 {
        return Some(ProviderError::InvalidApiKey);
    }
    if status == 404 {
        return Some(ProviderError::NotFound);
    }
    if status == 429 {
        return Some(ProviderError::RateLimited);
    }
    if !status.is_success() {
        return Some(ProviderError::ApiError(format!(
            "TMDB API returned status: {status}"
        )));
    }
    None
}

/// Map one multi-search entry into the domain, or drop it.
///
/// People and other non-title kinds are skipped, as are entries without an
/// id. TV entries name their fields differently, hence the fallback pairs.
fn ingest_entry(entry: TmdbSearchEntry) -> Option<SearchResult> {
    let kind = MediaKind::from_provider_tag(entry.media_type.as_deref()?)?;
    let id = entry.id?;

    Some(SearchResult {
        key: MediaKey::new(kind, id),
        title: entry
            .title
            .or(entry.name)
            .unwrap_or_else(|| "Untitled".to_string()),
        poster_path: entry.poster_path.map(ImagePath::new),
        backdrop_path: entry.backdrop_path.map(ImagePath::new),
        rating: entry.vote_average.unwrap_or(0.0),
        release_date: entry.release_date.or(entry.first_air_date).unwrap_or_default(),
        overview: entry.overview.unwrap_or_default(),
    })
}

fn ingest_details(body: TmdbDetailsResponse) -> MediaDetails {
    // A runtime of zero means TMDB does not know it.
    let runtime_minutes = body
        .runtime
        .filter(|&minutes| minutes > 0)
        .or_else(|| {
            body.episode_run_time
                .as_deref()
                .unwrap_or_default()
                .first()
                .copied()
                .filter(|&minutes| minutes > 0)
        });

    let cast = body
        .credits
        .map(|credits| credits.cast)
        .unwrap_or_default()
        .into_iter()
        .take(CAST_LIMIT)
        .map(|member| CastMember {
            name: member.name,
            character: member.character,
            profile_path: member.profile_path.map(ImagePath::new),
        })
        .collect();

    MediaDetails {
        genres: body
            .genres
            .unwrap_or_default()
            .into_iter()
            .map(|genre| genre.name)
            .collect(),
        runtime_minutes,
        cast,
        backdrop_path: body.backdrop_path.map(ImagePath::new),
    }
}

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    results: Vec<TmdbSearchEntry>,
    page: Option<u32>,
    total_pages: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TmdbSearchEntry {
    id: Option<u64>,
    media_type: Option<String>,
    title: Option<String>,
    /// TV entries carry `name` instead of `title`.
    name: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f32>,
    release_date: Option<String>,
    /// TV entries carry `first_air_date` instead of `release_date`.
    first_air_date: Option<String>,
    overview: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbDetailsResponse {
    genres: Option<Vec<TmdbGenre>>,
    runtime: Option<u32>,
    episode_run_time: Option<Vec<u32>>,
    backdrop_path: Option<String>,
    credits: Option<TmdbCredits>,
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TmdbCredits {
    cast: Vec<TmdbCastMember>,
}

#[derive(Debug, Deserialize)]
struct TmdbCastMember {
    name: String,
    character: Option<String>,
    profile_path: Option<String>,
}
