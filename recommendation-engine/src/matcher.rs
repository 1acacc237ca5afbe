//! Route-intersection matching: relate a user's frequent routes to the
//! located incidents, then pick an alternative venue from the POI registry.

use crate::message;
use tracing::{debug, info};
use vialert_core::{
    EnrichedRecord, HazardState, PointOfInterest, Recommendation, RecommendError, User,
};

/// Holds the three registries for the lifetime of the process. All matching
/// calls borrow from it; nothing here is ever mutated after construction.
pub struct Recommender {
    pub(crate) users: Vec<User>,
    pub(crate) pois: Vec<PointOfInterest>,
    pub(crate) incidents: Vec<EnrichedRecord>,
}

impl Recommender {
    pub fn new(users: Vec<User>, pois: Vec<PointOfInterest>, incidents: Vec<EnrichedRecord>) -> Self {
        Self {
            users,
            pois,
            incidents,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn pois(&self) -> &[PointOfInterest] {
        &self.pois
    }

    pub fn incidents(&self) -> &[EnrichedRecord] {
        &self.incidents
    }

    /// Route-intersection strategy. Finds the first incident touching one of
    /// the user's frequent routes, then recommends a venue in the user's
    /// zones matching their interests, falling back to a random pick from
    /// the whole registry when no venue qualifies.
    pub fn recommend_for_user(
        &self,
        user_id: &str,
        rng: &mut fastrand::Rng,
    ) -> Result<Recommendation<'_>, RecommendError> {
        let user = self.user(user_id)?;
        let hazard = self.first_hazard_for(user);
        let pool = self.poi_pool(user);
        debug!(
            "User {}: {} POI candidates in zone/interest pool",
            user_id,
            pool.len()
        );
        let poi = self.pick_poi(&pool, rng)?;

        let (state, message) = match hazard {
            Some(incident) => (
                HazardState::HazardFound,
                message::hazard_alert(incident, poi),
            ),
            None => (HazardState::NoHazard, message::all_clear(poi)),
        };
        info!("Recommendation for {}: {:?}, POI {}", user_id, state, poi.poi_id);

        Ok(Recommendation {
            user,
            state,
            hazard,
            poi,
            message,
        })
    }

    pub(crate) fn user(&self, user_id: &str) -> Result<&User, RecommendError> {
        self.users
            .iter()
            .find(|u| u.user_id == user_id)
            .ok_or_else(|| RecommendError::UserNotFound {
                user_id: user_id.to_string(),
            })
    }

    /// First located incident whose location string contains one of the
    /// user's routes, case-insensitively. Source order decides among ties.
    pub(crate) fn first_hazard_for(&self, user: &User) -> Option<&EnrichedRecord> {
        self.incidents.iter().find(|record| {
            record.has_locations() && {
                let locations = record.extracted_locations.to_lowercase();
                user.frequent_routes
                    .iter()
                    .any(|route| locations.contains(&route.to_lowercase()))
            }
        })
    }

    /// Venues in the user's residential or work zone sharing at least one
    /// interest tag.
    pub(crate) fn poi_pool(&self, user: &User) -> Vec<&PointOfInterest> {
        self.pois
            .iter()
            .filter(|poi| self.in_user_zones(user, poi) && shares_interest(user, poi))
            .collect()
    }

    pub(crate) fn in_user_zones(&self, user: &User, poi: &PointOfInterest) -> bool {
        let zone = poi.zone.to_lowercase();
        zone == user.residential_zone.to_lowercase() || zone == user.work_zone.to_lowercase()
    }

    /// Random pick from the pool, or from the whole registry when the pool
    /// is empty. Only an empty registry is an error.
    pub(crate) fn pick_poi<'s>(
        &'s self,
        pool: &[&'s PointOfInterest],
        rng: &mut fastrand::Rng,
    ) -> Result<&'s PointOfInterest, RecommendError> {
        if !pool.is_empty() {
            return Ok(pool[rng.usize(..pool.len())]);
        }
        if self.pois.is_empty() {
            return Err(RecommendError::EmptyPoiRegistry);
        }
        Ok(&self.pois[rng.usize(..self.pois.len())])
    }
}

fn shares_interest(user: &User, poi: &PointOfInterest) -> bool {
    poi.related_interests.iter().any(|related| {
        user.interests
            .iter()
            .any(|interest| interest.to_lowercase() == related.to_lowercase())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vialert_core::{IncidentCategory, Post, TimeSlot};

    fn user(id: &str, zones: (&str, &str), interests: &[&str], routes: &[&str]) -> User {
        User {
            user_id: id.to_string(),
            name: format!("Usuario {}", id),
            residential_zone: zones.0.to_string(),
            work_zone: zones.1.to_string(),
            interests: interests.iter().map(|i| i.to_string()).collect(),
            frequent_routes: routes.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn poi(id: &str, poi_type: &str, zone: &str, interests: &[&str], routes: &[&str]) -> PointOfInterest {
        PointOfInterest {
            poi_id: id.to_string(),
            name: format!("{} {}", poi_type, zone),
            poi_type: poi_type.to_string(),
            zone: zone.to_string(),
            related_interests: interests.iter().map(|i| i.to_string()).collect(),
            nearby_routes: routes.iter().map(|r| r.to_string()).collect(),
            schedule: "8:00-20:00".to_string(),
            current_offer: "2x1 en servicios".to_string(),
            description: None,
        }
    }

    fn incident(id: &str, locations: &str) -> EnrichedRecord {
        EnrichedRecord {
            post: Post {
                id: id.to_string(),
                text: Some("Accidente reportado".to_string()),
                timestamp: None,
                user: "@amet_rd".to_string(),
                platform: "instagram".to_string(),
                likes: 10,
                comments_count: 2,
                video_views: 100,
            },
            extracted_locations: locations.to_string(),
            incident_type: IncidentCategory::VehicleAccident,
            severity_score: 0.75,
            confidence_score: 0.4,
            word_count: 2,
            char_count: 19,
            entities_found: 1,
            time_slot: TimeSlot::Unspecified,
            critical_time: false,
            alert_required: true,
        }
    }

    fn recommender() -> Recommender {
        Recommender::new(
            vec![
                user(
                    "U001",
                    ("Los Mina", "Piantini"),
                    &["deportes"],
                    &["Avenida Duarte"],
                ),
                user(
                    "U002",
                    ("Gazcue", "Gazcue"),
                    &["lectura"],
                    &["Autopista Las Américas"],
                ),
            ],
            vec![
                poi("P001", "Gimnasio", "Los Mina", &["deportes", "salud"], &["Avenida Duarte"]),
                poi("P002", "Cine", "Los Mina", &["películas"], &["Calle Mella"]),
                poi("P003", "Parque", "Gazcue", &["deportes"], &["Avenida Duarte"]),
            ],
            vec![
                incident("A001", "Calle Mella"),
                incident("A002", "Avenida Duarte, Km 5"),
                incident("A003", "Avenida Duarte"),
            ],
        )
    }

    #[test]
    fn test_hazard_found_selects_first_matching_record() {
        let recommender = recommender();
        let mut rng = fastrand::Rng::with_seed(7);
        let result = recommender.recommend_for_user("U001", &mut rng).unwrap();

        assert_eq!(result.state, HazardState::HazardFound);
        let hazard = result.hazard.unwrap();
        assert_eq!(hazard.post.id, "A002");
        assert!(result.message.contains("Avenida Duarte, Km 5"));
        assert!(result.message.contains("Evita esa ruta"));
    }

    #[test]
    fn test_no_hazard_produces_positive_message() {
        let recommender = recommender();
        let mut rng = fastrand::Rng::with_seed(7);
        let result = recommender.recommend_for_user("U002", &mut rng).unwrap();

        assert_eq!(result.state, HazardState::NoHazard);
        assert!(result.hazard.is_none());
        assert!(result.message.starts_with("✅ No hay incidentes"));
        assert!(!result.message.contains("Evita"));
    }

    #[test]
    fn test_unknown_user_is_reported() {
        let recommender = recommender();
        let mut rng = fastrand::Rng::with_seed(7);
        let err = recommender.recommend_for_user("U999", &mut rng).unwrap_err();
        assert!(matches!(err, RecommendError::UserNotFound { user_id } if user_id == "U999"));
    }

    #[test]
    fn test_pool_requires_zone_and_shared_interest() {
        let recommender = recommender();
        // P001 matches zone and interest; P002 matches zone only; P003
        // matches interest only.
        for seed in [1, 99, 4242] {
            let mut rng = fastrand::Rng::with_seed(seed);
            let result = recommender.recommend_for_user("U001", &mut rng).unwrap();
            assert_eq!(result.poi.poi_id, "P001");
        }
    }

    #[test]
    fn test_empty_pool_falls_back_to_whole_registry() {
        let recommender = recommender();
        let mut rng = fastrand::Rng::with_seed(11);
        let first = recommender.recommend_for_user("U002", &mut rng).unwrap();
        assert!(["P001", "P002", "P003"].contains(&first.poi.poi_id.as_str()));

        // Same seed, same pick.
        let mut rng = fastrand::Rng::with_seed(11);
        let second = recommender.recommend_for_user("U002", &mut rng).unwrap();
        assert_eq!(first.poi.poi_id, second.poi.poi_id);
    }

    #[test]
    fn test_empty_registry_is_an_error() {
        let recommender = Recommender::new(
            vec![user("U001", ("Los Mina", "Piantini"), &["deportes"], &[])],
            Vec::new(),
            Vec::new(),
        );
        let mut rng = fastrand::Rng::with_seed(7);
        let err = recommender.recommend_for_user("U001", &mut rng).unwrap_err();
        assert!(matches!(err, RecommendError::EmptyPoiRegistry));
    }

    #[test]
    fn test_route_match_is_case_insensitive() {
        let recommender = Recommender::new(
            vec![user("U001", ("Los Mina", "Piantini"), &["deportes"], &["avenida duarte"])],
            vec![poi("P001", "Gimnasio", "Los Mina", &["deportes"], &[])],
            vec![incident("A001", "Avenida Duarte, Km 5")],
        );
        let mut rng = fastrand::Rng::with_seed(7);
        let result = recommender.recommend_for_user("U001", &mut rng).unwrap();
        assert_eq!(result.state, HazardState::HazardFound);
    }

    #[test]
    fn test_unlocated_incidents_never_match() {
        let recommender = Recommender::new(
            vec![user("U001", ("Los Mina", "Piantini"), &["deportes"], &["Avenida Duarte"])],
            vec![poi("P001", "Gimnasio", "Los Mina", &["deportes"], &[])],
            vec![incident("A001", "   ")],
        );
        let mut rng = fastrand::Rng::with_seed(7);
        let result = recommender.recommend_for_user("U001", &mut rng).unwrap();
        assert_eq!(result.state, HazardState::NoHazard);
    }
}
