/// Deterministic ordering of raw catalog items
///
/// Two comparators, both stable descending sorts:
/// - quality-first: rating, then count proxy, then year. Used whenever a
///   rating-like signal can exist in the payload.
/// - popularity-first: count proxy, then year. Used for the unfiltered
///   fallback, where the richer signals may be absent.
///
/// Missing or invalid numeric fields never fail a sort; they degrade to the
/// sentinel defaults below, which every consumer shares.
use crate::models::CatalogItem;

/// Sits below every real rating, so unrated items sort last on the
/// primary key
pub const RATING_SENTINEL: f64 = -1.0;

/// Rating with the absent/invalid case collapsed to `RATING_SENTINEL`
pub fn rating_or_sentinel(rating: Option<f64>) -> f64 {
    rating.filter(|r| r.is_finite()).unwrap_or(RATING_SENTINEL)
}

/// Count-like proxy with absence collapsed to 0
pub fn count_or_zero(count: Option<u64>) -> u64 {
    count.unwrap_or(0)
}

/// Year with absence collapsed to 0
pub fn year_or_zero(year: Option<i64>) -> i64 {
    year.unwrap_or(0)
}

/// Scoring proxy with absence collapsed to 1, not 0: a zero score would
/// make an item unselectable downstream no matter how confident the
/// emotion prediction is.
pub fn proxy_or_one(proxy: Option<f64>) -> f64 {
    proxy.filter(|p| p.is_finite()).unwrap_or(1.0)
}

fn quality_key<T: CatalogItem>(item: &T) -> (f64, u64, i64) {
    (
        rating_or_sentinel(item.rating()),
        count_or_zero(item.count_proxy()),
        year_or_zero(item.year()),
    )
}

fn popularity_key<T: CatalogItem>(item: &T) -> (u64, i64) {
    (count_or_zero(item.count_proxy()), year_or_zero(item.year()))
}

/// Stable descending sort by rating, count proxy, year
pub fn rank_quality_first<T: CatalogItem>(items: &mut [T]) {
    items.sort_by(|a, b| {
        let ka = quality_key(a);
        let kb = quality_key(b);
        kb.0.total_cmp(&ka.0)
            .then(kb.1.cmp(&ka.1))
            .then(kb.2.cmp(&ka.2))
    });
}

/// Stable descending sort by count proxy, year
pub fn rank_popularity_first<T: CatalogItem>(items: &mut [T]) {
    items.sort_by(|a, b| {
        let ka = popularity_key(a);
        let kb = popularity_key(b);
        kb.0.cmp(&ka.0).then(kb.1.cmp(&ka.1))
    });
}
