//! Interest-similarity ranking: TF-IDF fingerprints for the user and every
//! POI, cosine scores, then a route filter with an unfiltered fallback.

use crate::matcher::Recommender;
use crate::tfidf::{cosine_similarity, TfidfVectorizer};
use tracing::debug;
use vialert_core::{PointOfInterest, RankedPoi, RecommendError, User};

const TOP_RANKED: usize = 3;

impl Recommender {
    /// Ranks every POI against the user's interest fingerprint and returns
    /// the top entries. POIs sharing a route with the user are preferred;
    /// when none does, the unfiltered ranking is used instead. No
    /// randomness is involved at any stage.
    pub fn rank_by_interests(&self, user_id: &str) -> Result<Vec<RankedPoi<'_>>, RecommendError> {
        let user = self.user(user_id)?;
        if self.pois.is_empty() {
            return Err(RecommendError::EmptyPoiRegistry);
        }

        let mut corpus = Vec::with_capacity(self.pois.len() + 1);
        corpus.push(user_fingerprint(user));
        corpus.extend(self.pois.iter().map(poi_fingerprint));

        let vectorizer = TfidfVectorizer::fit(&corpus);
        let user_vector = vectorizer.transform(&corpus[0]);

        let mut ranked: Vec<RankedPoi<'_>> = self
            .pois
            .iter()
            .zip(&corpus[1..])
            .map(|(poi, fingerprint)| RankedPoi {
                poi,
                similarity: cosine_similarity(&user_vector, &vectorizer.transform(fingerprint)),
            })
            .collect();
        // Stable sort keeps registry order among equal scores.
        ranked.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

        let (mut on_route, off_route): (Vec<_>, Vec<_>) = ranked
            .into_iter()
            .partition(|entry| shares_route(user, entry.poi));
        debug!(
            "User {}: {} of {} POIs share a route",
            user_id,
            on_route.len(),
            on_route.len() + off_route.len()
        );
        // Partition preserves order, so when nothing shares a route the
        // right side is exactly the full ranking.
        if on_route.is_empty() {
            on_route = off_route;
        }
        on_route.truncate(TOP_RANKED);
        Ok(on_route)
    }
}

fn user_fingerprint(user: &User) -> String {
    user.interests.join(" ")
}

fn poi_fingerprint(poi: &PointOfInterest) -> String {
    let mut parts: Vec<&str> = poi.related_interests.iter().map(String::as_str).collect();
    parts.push(&poi.poi_type);
    parts.join(" ")
}

fn shares_route(user: &User, poi: &PointOfInterest) -> bool {
    poi.nearby_routes.iter().any(|near| {
        user.frequent_routes
            .iter()
            .any(|route| route.to_lowercase() == near.to_lowercase())
    })
}
