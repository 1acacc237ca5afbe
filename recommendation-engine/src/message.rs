//! Rendered recommendation texts. These strings are user-facing and
//! Spanish; tests pin them verbatim so wording changes are deliberate.

use vialert_core::{EnrichedRecord, PointOfInterest};

/// Warning plus venue suggestion for a hazard on the user's routes.
pub fn hazard_alert(incident: &EnrichedRecord, poi: &PointOfInterest) -> String {
    format!(
        "🚧 Se reporta un {} en {}. Evita esa ruta.\n\
         🧭 Te sugerimos visitar **{}** ({}) en {}. 💡 {}.",
        incident.incident_type.label().to_lowercase(),
        incident.extracted_locations,
        poi.name,
        poi.poi_type,
        poi.zone,
        poi.current_offer,
    )
}

/// Purely positive suggestion when no hazard touches the user's routes.
pub fn all_clear(poi: &PointOfInterest) -> String {
    format!(
        "✅ No hay incidentes en tus rutas hoy. Te recomendamos **{}** ({}) en {}. \
         Oferta actual: {}.",
        poi.name, poi.poi_type, poi.zone, poi.current_offer,
    )
}

/// Broadcast variant of the hazard warning.
pub fn broadcast_alert(incident: &EnrichedRecord, poi: &PointOfInterest) -> String {
    format!(
        "🚧 ALERTA: Se reporta un {} en {}. Se recomienda evitar esta ruta.\n\
         🧭 Te sugerimos visitar **{}** ({}) en {}. 💡 Oferta actual: {}.",
        incident.incident_type.label().to_lowercase(),
        incident.extracted_locations,
        poi.name,
        poi.poi_type,
        poi.zone,
        poi.current_offer,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use vialert_core::{IncidentCategory, Post, TimeSlot};

    fn sample_poi() -> PointOfInterest {
        PointOfInterest {
            poi_id: "P001".to_string(),
            name: "Gimnasio Las Américas".to_string(),
            poi_type: "Gimnasio".to_string(),
            zone: "Los Mina".to_string(),
            related_interests: vec!["deportes".to_string()],
            nearby_routes: vec!["Las Américas".to_string()],
            schedule: "6:00-22:00".to_string(),
            current_offer: "2x1 en servicios".to_string(),
            description: None,
        }
    }

    fn sample_incident() -> EnrichedRecord {
        EnrichedRecord {
            post: Post {
                id: "A001".to_string(),
                text: Some("Choque en la avenida Duarte".to_string()),
                timestamp: None,
                user: "@amet_rd".to_string(),
                platform: "instagram".to_string(),
                likes: 0,
                comments_count: 0,
                video_views: 0,
            },
            extracted_locations: "Avenida Duarte, Km 5".to_string(),
            incident_type: IncidentCategory::VehicleAccident,
            severity_score: 0.75,
            confidence_score: 0.4,
            word_count: 5,
            char_count: 27,
            entities_found: 2,
            time_slot: TimeSlot::Unspecified,
            critical_time: false,
            alert_required: true,
        }
    }

    #[test]
    fn test_hazard_alert_wording() {
        let message = hazard_alert(&sample_incident(), &sample_poi());
        assert_eq!(
            message,
            "🚧 Se reporta un accidente vehicular en Avenida Duarte, Km 5. Evita esa ruta.\n\
             🧭 Te sugerimos visitar **Gimnasio Las Américas** (Gimnasio) en Los Mina. \
             💡 2x1 en servicios."
        );
    }

    #[test]
    fn test_all_clear_wording() {
        let message = all_clear(&sample_poi());
        assert_eq!(
            message,
            "✅ No hay incidentes en tus rutas hoy. Te recomendamos \
             **Gimnasio Las Américas** (Gimnasio) en Los Mina. Oferta actual: 2x1 en servicios."
        );
    }

    #[test]
    fn test_broadcast_alert_wording() {
        let message = broadcast_alert(&sample_incident(), &sample_poi());
        assert!(message.starts_with("🚧 ALERTA: Se reporta un accidente vehicular"));
        assert!(message.contains("Se recomienda evitar esta ruta.\n"));
        assert!(message.ends_with("💡 Oferta actual: 2x1 en servicios."));
    }
}
