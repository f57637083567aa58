/// Query relaxation engine
///
/// Precision over recall: try the full category list first, then shorter
/// and shorter prefixes, and return the first non-empty result set. Only
/// when every prefix comes back empty does the engine issue one unfiltered
/// query under the same language and paging constraints, ranked by the
/// coarser popularity comparator since the richer signals may be absent.
///
/// Catalog failures are not caught here: a transport error or non-2xx
/// response at any step aborts the whole discovery. The unfiltered query is
/// the designed next step after empty filtered results, not an error
/// handler.
use crate::{
    error::AppResult,
    models::{BookDoc, Emotion, Mode, MoodCategories, MovieResult, Recommendation},
    services::{
        providers::{BookCatalog, BookFilters, MovieCatalog, MovieFilters},
        ranking,
    },
};

/// Categories tag for items found by the unfiltered fallback
pub const NO_CATEGORY_MATCH: &str = "—";

/// Discover books for one emotion via subject relaxation
pub async fn discover_books_for_emotion(
    catalog: &dyn BookCatalog,
    moods: &MoodCategories,
    emotion: Emotion,
    mode: Mode,
    filters: &BookFilters,
) -> AppResult<Vec<Recommendation<BookDoc>>> {
    let subjects = moods.categories_for(emotion, mode);

    for k in (1..=subjects.len()).rev() {
        let tried = &subjects[..k];
        let mut docs = catalog.search(tried, filters).await?;
        if docs.is_empty() {
            continue;
        }

        ranking::rank_quality_first(&mut docs);
        tracing::debug!(
            emotion = %emotion,
            subjects = k,
            results = docs.len(),
            "Relaxation step matched"
        );
        return Ok(tag_books(catalog, docs, emotion, tried.join(", ")));
    }

    // Every prefix exhausted; best-effort popularity query
    let mut docs = catalog.search(&[], filters).await?;
    ranking::rank_popularity_first(&mut docs);
    tracing::debug!(
        emotion = %emotion,
        results = docs.len(),
        "Unfiltered fallback"
    );
    Ok(tag_books(catalog, docs, emotion, NO_CATEGORY_MATCH.to_string()))
}

/// Discover movies for one emotion via genre relaxation
///
/// Genre names resolve against the catalog's name → id map once per call;
/// names unknown to the catalog drop out of the filter without failing.
pub async fn discover_movies_for_emotion(
    catalog: &dyn MovieCatalog,
    moods: &MoodCategories,
    emotion: Emotion,
    mode: Mode,
    filters: &MovieFilters,
) -> AppResult<Vec<Recommendation<MovieResult>>> {
    let genre_names = moods.categories_for(emotion, mode);

    if !genre_names.is_empty() {
        let genre_map = catalog.genre_map(&filters.language).await?;

        for k in (1..=genre_names.len()).rev() {
            let tried = &genre_names[..k];
            let genre_ids: Vec<u64> = tried
                .iter()
                .filter_map(|name| genre_map.get(name).copied())
                .collect();

            let mut results = catalog.discover(&genre_ids, filters).await?;
            if results.is_empty() {
                continue;
            }

            ranking::rank_quality_first(&mut results);
            tracing::debug!(
                emotion = %emotion,
                genres = k,
                results = results.len(),
                "Relaxation step matched"
            );
            return Ok(tag_movies(catalog, results, emotion, tried.join(", ")));
        }
    }

    let mut results = catalog.discover(&[], filters).await?;
    ranking::rank_popularity_first(&mut results);
    tracing::debug!(
        emotion = %emotion,
        results = results.len(),
        "Unfiltered fallback"
    );
    Ok(tag_movies(
        catalog,
        results,
        emotion,
        NO_CATEGORY_MATCH.to_string(),
    ))
}

fn tag_books(
    catalog: &dyn BookCatalog,
    docs: Vec<BookDoc>,
    mood: Emotion,
    categories: String,
) -> Vec<Recommendation<BookDoc>> {
    docs.into_iter()
        .map(|doc| {
            let image_url = catalog.cover_url(&doc);
            Recommendation {
                item: doc,
                mood,
                categories: categories.clone(),
                image_url,
                score: 0.0,
            }
        })
        .collect()
}

fn tag_movies(
    catalog: &dyn MovieCatalog,
    results: Vec<MovieResult>,
    mood: Emotion,
    categories: String,
) -> Vec<Recommendation<MovieResult>> {
    results
        .into_iter()
        .map(|movie| {
            let image_url = catalog.poster_url(&movie);
            Recommendation {
                item: movie,
                mood,
                categories: categories.clone(),
                image_url,
                score: 0.0,
            }
        })
        .collect()
}
