use crate::Recommender;
use vialert_core::{
    EnrichedRecord, HazardState, IncidentCategory, PointOfInterest, Post, TimeSlot, User,
};

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

fn poi(
    id: &str,
    name: &str,
    poi_type: &str,
    zone: &str,
    interests: &[&str],
    routes: &[&str],
    offer: &str,
) -> PointOfInterest {
    PointOfInterest {
        poi_id: id.to_string(),
        name: name.to_string(),
        poi_type: poi_type.to_string(),
        zone: zone.to_string(),
        related_interests: interests.iter().map(|i| i.to_string()).collect(),
        nearby_routes: routes.iter().map(|r| r.to_string()).collect(),
        schedule: "8:00-20:00".to_string(),
        current_offer: offer.to_string(),
        description: None,
    }
}

fn incident(id: &str, locations: &str, category: IncidentCategory) -> EnrichedRecord {
    EnrichedRecord {
        post: Post {
            id: id.to_string(),
            text: Some("Incidente reportado en la vía".to_string()),
            timestamp: None,
            user: "@amet_rd".to_string(),
            platform: "instagram".to_string(),
            likes: 120,
            comments_count: 14,
            video_views: 2500,
        },
        extracted_locations: locations.to_string(),
        incident_type: category,
        severity_score: 0.8,
        confidence_score: 0.5,
        word_count: 5,
        char_count: 29,
        entities_found: 2,
        time_slot: TimeSlot::Night,
        critical_time: true,
        alert_required: true,
    }
}

/// Small but realistic set: three users, four venues, three incidents.
fn recommender() -> Recommender {
    Recommender::new(
        vec![
            user(
                "U001",
                ("Los Mina", "Piantini"),
                &["deportes", "salud"],
                &["Avenida Duarte"],
            ),
            user(
                "U002",
                ("Gazcue", "Gazcue"),
                &["gastronomía", "negocios"],
                &["Autopista Las Américas"],
            ),
            user(
                "U003",
                ("Villa Mella", "Villa Mella"),
                &["lectura"],
                &["Circunvalación Norte"],
            ),
        ],
        vec![
            poi(
                "P001",
                "Gimnasio Las Américas",
                "Gimnasio",
                "Los Mina",
                &["deportes", "salud"],
                &["Las Américas"],
                "2x1 en servicios",
            ),
            poi(
                "P002",
                "Cafetería El Conde",
                "Cafetería",
                "Gazcue",
                &["gastronomía", "negocios"],
                &["El Conde"],
                "Nuevo menú",
            ),
            poi(
                "P003",
                "Cine Sambil",
                "Cine",
                "Piantini",
                &["películas", "entretenimiento"],
                &["27 De Febrero"],
                "Promoción del día",
            ),
            poi(
                "P004",
                "Parque Mirador",
                "Parque",
                "Los Mina",
                &["deportes", "fotografía"],
                &["Avenida Duarte"],
                "Clase gratuita",
            ),
        ],
        vec![
            incident("A001", "Calle Mella", IncidentCategory::RoadClosure),
            incident(
                "A002",
                "Avenida Duarte, Km 5",
                IncidentCategory::VehicleAccident,
            ),
            incident(
                "A003",
                "Autopista Las Américas",
                IncidentCategory::VehicleFire,
            ),
        ],
    )
}

// Route-Intersection (R1) Scenarios

#[test]
fn test_hazard_message_composition_end_to_end() {
    let recommender = recommender();
    // U001's pool is {P001, P004}; seed 1 fixes the pick.
    let mut rng = fastrand::Rng::with_seed(1);
    let result = recommender.recommend_for_user("U001", &mut rng).unwrap();

    assert_eq!(result.state, HazardState::HazardFound);
    assert_eq!(result.hazard.unwrap().post.id, "A002");
    assert!(result.message.starts_with(
        "🚧 Se reporta un accidente vehicular en Avenida Duarte, Km 5. Evita esa ruta.\n"
    ));
    assert!(result.message.contains("🧭 Te sugerimos visitar **"));
    assert!(["P001", "P004"].contains(&result.poi.poi_id.as_str()));
}

#[test]
fn test_all_clear_for_unaffected_user() {
    let recommender = recommender();
    let mut rng = fastrand::Rng::with_seed(1);
    let result = recommender.recommend_for_user("U003", &mut rng).unwrap();

    assert_eq!(result.state, HazardState::NoHazard);
    assert!(result.message.starts_with("✅ No hay incidentes en tus rutas hoy."));
    assert!(!result.message.contains("Evita"));
}

#[test]
fn test_same_seed_reproduces_the_recommendation() {
    let recommender = recommender();
    for user_id in ["U001", "U002", "U003"] {
        let mut first_rng = fastrand::Rng::with_seed(99);
        let mut second_rng = fastrand::Rng::with_seed(99);
        let first = recommender.recommend_for_user(user_id, &mut first_rng).unwrap();
        let second = recommender
            .recommend_for_user(user_id, &mut second_rng)
            .unwrap();
        assert_eq!(first.poi.poi_id, second.poi.poi_id);
        assert_eq!(first.message, second.message);
    }
}

// Interest-Similarity (R2) Scenarios

#[test]
fn test_ranking_returns_annotated_top_three() {
    let recommender = recommender();
    let ranked = recommender.rank_by_interests("U002").unwrap();

    // U002's routes match no venue, so the unfiltered ranking applies.
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].poi.poi_id, "P002");
    assert!(ranked[0].similarity > ranked[1].similarity);
    assert!(!ranked[0].poi.zone.is_empty());
    assert!(!ranked[0].poi.current_offer.is_empty());
    assert!(!ranked[0].poi.schedule.is_empty());
}

#[test]
fn test_ranking_prefers_route_matches() {
    let recommender = recommender();
    let ranked = recommender.rank_by_interests("U001").unwrap();

    // Only P004 sits on U001's route, so the filter keeps exactly it.
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].poi.poi_id, "P004");
}

// Broadcast (R3) Scenarios

#[test]
fn test_broadcast_emits_one_alert_per_affected_user() {
    let recommender = recommender();
    // All three incidents are located; the sample may land on any of them.
    let mut rng = fastrand::Rng::with_seed(0);
    let outcome = recommender.broadcast_from_incident(&mut rng).unwrap();

    match outcome {
        vialert_core::BroadcastOutcome::Notified {
            incident,
            recommendations,
        } => {
            // Whichever incident was sampled, every alert references it.
            for rec in &recommendations {
                assert_eq!(rec.hazard.unwrap().post.id, incident.post.id);
                assert!(rec.message.contains(&incident.extracted_locations));
            }
            assert!(!recommendations.is_empty());
        }
        vialert_core::BroadcastOutcome::NoAffectedUsers { incident } => {
            // Only A001 has no matching user routes.
            assert_eq!(incident.post.id, "A001");
        }
    }
}
