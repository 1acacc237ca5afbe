use chrono::NaiveDateTime;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Post {
    pub id: String,
    pub text: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
    pub user: String,
    pub platform: String,
    pub likes: u64,
    pub comments_count: u64,
    pub video_views: u64,
}

/// Which extraction source contributed a location mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    Pattern,
    KmMarker,
    Gazetteer,
    Ner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationMention {
    pub text: String,
    pub method: ExtractionMethod,
}

impl LocationMention {
    pub fn new(text: impl Into<String>, method: ExtractionMethod) -> Self {
        Self {
            text: text.into(),
            method,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncidentCategory {
    VehicleAccident,
    VehicleFire,
    RoadClosure,
    WeatherAlert,
    TrafficMeasure,
    Event,
    Other,
    Unclassified,
}

impl IncidentCategory {
    /// Spanish label used in tables and rendered messages.
    pub fn label(&self) -> &'static str {
        match self {
            IncidentCategory::VehicleAccident => "Accidente vehicular",
            IncidentCategory::VehicleFire => "Incendio vehicular",
            IncidentCategory::RoadClosure => "Cierre vial",
            IncidentCategory::WeatherAlert => "Alerta meteorológica",
            IncidentCategory::TrafficMeasure => "Medidas de tránsito",
            IncidentCategory::Event => "Evento/Anuncio",
            IncidentCategory::Other => "Otro",
            IncidentCategory::Unclassified => "No clasificado",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let all = [
            IncidentCategory::VehicleAccident,
            IncidentCategory::VehicleFire,
            IncidentCategory::RoadClosure,
            IncidentCategory::WeatherAlert,
            IncidentCategory::TrafficMeasure,
            IncidentCategory::Event,
            IncidentCategory::Other,
            IncidentCategory::Unclassified,
        ];
        all.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for IncidentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityBucket {
    Low,
    Moderate,
    Severe,
}

impl SeverityBucket {
    pub fn label(&self) -> &'static str {
        match self {
            SeverityBucket::Low => "Leve",
            SeverityBucket::Moderate => "Moderado",
            SeverityBucket::Severe => "Grave",
        }
    }
}

impl fmt::Display for SeverityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Continuous severity with its confidence, both in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityScore {
    pub score: f64,
    pub confidence: f64,
}

impl SeverityScore {
    pub fn new(score: f64, confidence: f64) -> Self {
        Self { score, confidence }
    }

    /// All-zero score used for absent text and defaulted records.
    pub fn zero() -> Self {
        Self {
            score: 0.0,
            confidence: 0.0,
        }
    }

    pub fn bucket(&self) -> SeverityBucket {
        if self.score <= 0.3 {
            SeverityBucket::Low
        } else if self.score <= 0.7 {
            SeverityBucket::Moderate
        } else {
            SeverityBucket::Severe
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSlot {
    EarlyMorning,
    MidMorning,
    Midday,
    Afternoon,
    EarlyEvening,
    Night,
    LateNight,
    Unspecified,
}

impl TimeSlot {
    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::EarlyMorning => "Mañana temprano (5am-9am)",
            TimeSlot::MidMorning => "Media mañana (9am-12pm)",
            TimeSlot::Midday => "Mediodía (12pm-3pm)",
            TimeSlot::Afternoon => "Tarde (3pm-6pm)",
            TimeSlot::EarlyEvening => "Noche temprano (6pm-9pm)",
            TimeSlot::Night => "Noche (9pm-12am)",
            TimeSlot::LateNight => "Madrugada (12am-5am)",
            TimeSlot::Unspecified => "No especificado",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let all = [
            TimeSlot::EarlyMorning,
            TimeSlot::MidMorning,
            TimeSlot::Midday,
            TimeSlot::Afternoon,
            TimeSlot::EarlyEvening,
            TimeSlot::Night,
            TimeSlot::LateNight,
            TimeSlot::Unspecified,
        ];
        all.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Full per-post analysis, with location mentions still carrying their
/// extraction source. Flattened into an [`EnrichedRecord`] for storage.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub locations: Vec<LocationMention>,
    pub category: IncidentCategory,
    pub severity: SeverityScore,
    pub word_count: usize,
    pub char_count: usize,
    pub time_slot: TimeSlot,
    pub critical_time: bool,
    pub alert_required: bool,
}

impl AnalysisResult {
    /// Default values for a record whose analysis faulted.
    pub fn fallback() -> Self {
        Self {
            locations: Vec::new(),
            category: IncidentCategory::Unclassified,
            severity: SeverityScore::zero(),
            word_count: 0,
            char_count: 0,
            time_slot: TimeSlot::Unspecified,
            critical_time: false,
            alert_required: false,
        }
    }

    pub fn entities_found(&self) -> usize {
        self.locations.len()
    }

    pub fn joined_locations(&self) -> String {
        self.locations
            .iter()
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A post merged with its analysis, flattened for tabular storage.
#[derive(Debug, Clone)]
pub struct EnrichedRecord {
    pub post: Post,
    pub extracted_locations: String,
    pub incident_type: IncidentCategory,
    pub severity_score: f64,
    pub confidence_score: f64,
    pub word_count: usize,
    pub char_count: usize,
    pub entities_found: usize,
    pub time_slot: TimeSlot,
    pub critical_time: bool,
    pub alert_required: bool,
}

impl EnrichedRecord {
    pub fn from_analysis(post: Post, analysis: &AnalysisResult) -> Self {
        Self {
            post,
            extracted_locations: analysis.joined_locations(),
            incident_type: analysis.category,
            severity_score: analysis.severity.score,
            confidence_score: analysis.severity.confidence,
            word_count: analysis.word_count,
            char_count: analysis.char_count,
            entities_found: analysis.entities_found(),
            time_slot: analysis.time_slot,
            critical_time: analysis.critical_time,
            alert_required: analysis.alert_required,
        }
    }

    pub fn severity(&self) -> SeverityScore {
        SeverityScore::new(self.severity_score, self.confidence_score)
    }

    pub fn has_locations(&self) -> bool {
        !self.extracted_locations.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub residential_zone: String,
    pub work_zone: String,
    pub interests: Vec<String>,
    pub frequent_routes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PointOfInterest {
    pub poi_id: String,
    pub name: String,
    pub poi_type: String,
    pub zone: String,
    pub related_interests: Vec<String>,
    pub nearby_routes: Vec<String>,
    pub schedule: String,
    pub current_offer: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardState {
    HazardFound,
    NoHazard,
}

/// Output of a single matching call. Borrows the registries; recomputed
/// per request, never stored.
#[derive(Debug)]
pub struct Recommendation<'a> {
    pub user: &'a User,
    pub state: HazardState,
    pub hazard: Option<&'a EnrichedRecord>,
    pub poi: &'a PointOfInterest,
    pub message: String,
}

#[derive(Debug)]
pub struct RankedPoi<'a> {
    pub poi: &'a PointOfInterest,
    pub similarity: f64,
}

#[derive(Debug)]
pub enum BroadcastOutcome<'a> {
    NoAffectedUsers {
        incident: &'a EnrichedRecord,
    },
    Notified {
        incident: &'a EnrichedRecord,
        recommendations: Vec<Recommendation<'a>>,
    },
}
