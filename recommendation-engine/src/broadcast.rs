//! Incident-centered broadcast: sample one located incident, find every
//! user whose routes touch it and emit one alert per affected user.

use crate::matcher::Recommender;
use crate::message;
use tracing::info;
use vialert_core::{
    BroadcastOutcome, EnrichedRecord, HazardState, PointOfInterest, Recommendation,
    RecommendError, User,
};

impl Recommender {
    /// Picks a random located incident and alerts every user whose
    /// frequent-route list matches its location string. Venue selection
    /// relaxes in stages: zone plus interests, zone only, whole registry.
    pub fn broadcast_from_incident(
        &self,
        rng: &mut fastrand::Rng,
    ) -> Result<BroadcastOutcome<'_>, RecommendError> {
        let located: Vec<&EnrichedRecord> = self
            .incidents
            .iter()
            .filter(|record| record.has_locations())
            .collect();
        if located.is_empty() {
            return Err(RecommendError::NoLocatedIncidents);
        }
        let incident = located[rng.usize(..located.len())];
        info!(
            "Broadcasting incident {} at {}",
            incident.post.id, incident.extracted_locations
        );

        let location = incident.extracted_locations.to_lowercase();
        let affected: Vec<&User> = self
            .users
            .iter()
            .filter(|user| {
                user.frequent_routes
                    .iter()
                    .any(|route| location.contains(&route.to_lowercase()))
            })
            .collect();

        if affected.is_empty() {
            info!("No affected users for incident {}", incident.post.id);
            return Ok(BroadcastOutcome::NoAffectedUsers { incident });
        }

        let mut recommendations = Vec::with_capacity(affected.len());
        for user in affected {
            let poi = self.pick_poi_staged(user, rng)?;
            recommendations.push(Recommendation {
                user,
                state: HazardState::HazardFound,
                hazard: Some(incident),
                poi,
                message: message::broadcast_alert(incident, poi),
            });
        }
        info!(
            "Incident {} affects {} users",
            incident.post.id,
            recommendations.len()
        );
        Ok(BroadcastOutcome::Notified {
            incident,
            recommendations,
        })
    }

    /// Three-stage venue pick: interests within the user's zones first,
    /// then any venue in those zones, then the whole registry.
    fn pick_poi_staged(
        &self,
        user: &User,
        rng: &mut fastrand::Rng,
    ) -> Result<&PointOfInterest, RecommendError> {
        let pool = self.poi_pool(user);
        if !pool.is_empty() {
            return Ok(pool[rng.usize(..pool.len())]);
        }
        let zoned: Vec<&PointOfInterest> = self
            .pois
            .iter()
            .filter(|poi| self.in_user_zones(user, poi))
            .collect();
        if !zoned.is_empty() {
            return Ok(zoned[rng.usize(..zoned.len())]);
        }
        if self.pois.is_empty() {
            return Err(RecommendError::EmptyPoiRegistry);
        }
        Ok(&self.pois[rng.usize(..self.pois.len())])
    }
}
