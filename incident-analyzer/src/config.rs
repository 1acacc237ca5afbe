//! Immutable analyzer configuration: gazetteer, lead-word patterns and
//! keyword inventories. Built once at startup and passed by reference.

use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use vialert_core::{ConfigError, EngineError, IncidentCategory};

/// Which part of a lead-pattern match becomes the emitted mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionSpan {
    /// Lead word plus captured phrase ("Avenida Duarte").
    WholeMatch,
    /// Captured phrase only, for prepositional leads ("cerca de X" -> "X").
    PhraseOnly,
}

#[derive(Debug, Clone)]
pub struct LeadPattern {
    regex: Regex,
    terminators: Vec<String>,
    span: MentionSpan,
}

impl LeadPattern {
    fn compile(pattern: &str, terminators: &[&str], span: MentionSpan) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            regex,
            terminators: terminators.iter().map(|t| t.to_string()).collect(),
            span,
        })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn terminators(&self) -> &[String] {
        &self.terminators
    }

    pub fn span(&self) -> MentionSpan {
        self.span
    }
}

/// Extra lead pattern supplied through a configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternSpec {
    pub pattern: String,
    #[serde(default)]
    pub terminators: Vec<String>,
    #[serde(default)]
    pub phrase_only: bool,
}

/// Optional replacements and additions loaded from JSON. Anything left
/// unset keeps the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigOverrides {
    pub gazetteer: Option<Vec<String>>,
    pub extra_patterns: Option<Vec<PatternSpec>>,
    pub high_severity: Option<Vec<String>>,
    pub medium_severity: Option<Vec<String>>,
    pub urgency_markers: Option<Vec<String>>,
    pub alert_override: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    gazetteer: Vec<String>,
    lead_patterns: Vec<LeadPattern>,
    km_regex: Regex,
    categories: Vec<(IncidentCategory, Vec<String>)>,
    high_severity: Vec<String>,
    medium_severity: Vec<String>,
    urgency_markers: Vec<String>,
    alert_override: Vec<String>,
}

const DEFAULT_GAZETTEER: &[&str] = &[
    "george washington",
    "máximo gómez",
    "máximo gomez",
    "winston churchill",
    "abraham lincoln",
    "john f kennedy",
    "charles de gaulle",
    "27 de febrero",
    "duarte",
    "mella",
    "sánchez",
    "luperón",
    "núñez de cáceres",
    "santo domingo este",
    "distrito nacional",
    "san isidro",
    "la barranquita",
    "los mina",
    "villa mella",
    "pantoja",
    "las américas",
    "ecológica",
    "charles summer",
    "los próceres",
    "juan pablo duarte",
    "isabel aguiar",
    "república de colombia",
    "circunvalación",
    "olímpica",
    "independencia",
    "san vicente de paul",
];

const DEFAULT_HIGH_SEVERITY: &[&str] = &[
    "fallecido",
    "muerto",
    "muerte",
    "fatal",
    "grave",
    "herido grave",
    "heridos",
    "víctima",
    "ambulancia",
    "hospital",
    "bomberos",
    "rescate",
    "emergencia",
];

const DEFAULT_MEDIUM_SEVERITY: &[&str] = &[
    "accidente",
    "choque",
    "incendio",
    "volcado",
    "colisión",
    "impacto",
    "daños",
    "afectado",
];

const DEFAULT_URGENCY_MARKERS: &[&str] =
    &["urgente", "importante", "alerta", "🚨", "cuidado", "peligro"];

const DEFAULT_ALERT_OVERRIDE: &[&str] = &["fallecido", "heridos", "grave"];

// Input text is lowercased before matching, so the patterns stay
// lowercase too. The phrase class stops at sentence punctuation; the
// listed terminator words cut the phrase afterwards.
const DEFAULT_LEAD_PATTERNS: &[(&str, &[&str], MentionSpan)] = &[
    (
        r"avenida\s+([^,.\n]+)",
        &["próximo", "cerca", "kilómetro"],
        MentionSpan::WholeMatch,
    ),
    (
        r"av\.?\s+([^,.\n]+)",
        &["próximo", "cerca", "kilómetro"],
        MentionSpan::WholeMatch,
    ),
    (
        r"autopista\s+([^,.\n]+)",
        &["kilómetro", "rampa"],
        MentionSpan::WholeMatch,
    ),
    (r"calle\s+([^,.\n]+)", &["esquina"], MentionSpan::WholeMatch),
    (r"puente\s+([^,.\n]+)", &["rampa"], MentionSpan::WholeMatch),
    (r"circunvalación\s+([^,.\n]+)", &[], MentionSpan::WholeMatch),
    (
        r"paso a desnivel\s+(?:de\s+)?(?:la\s+)?([^,.\n]+)",
        &[],
        MentionSpan::WholeMatch,
    ),
    (
        r"(?:sector|zona)\s+([^,.\n]+)",
        &[],
        MentionSpan::WholeMatch,
    ),
    (
        r"(?:cerca de|próximo a)\s+([^,.\n]+)",
        &[],
        MentionSpan::PhraseOnly,
    ),
];

const KM_PATTERN: &str = r"kilómetro\s+(\d+)";

fn default_categories() -> Vec<(IncidentCategory, Vec<String>)> {
    // Declaration order breaks classification ties, so it matters.
    let table: &[(IncidentCategory, &[&str])] = &[
        (
            IncidentCategory::VehicleAccident,
            &[
                "accidente",
                "choque",
                "colisión",
                "volcado",
                "impacto",
                "descarrilado",
                "estrellado",
            ],
        ),
        (
            IncidentCategory::VehicleFire,
            &["incendio", "incendiado", "fuego", "llamas", "quemado"],
        ),
        (
            IncidentCategory::RoadClosure,
            &[
                "cierre",
                "cerrado",
                "bloqueado",
                "restringido",
                "prohibido",
                "suspendido",
                "clausurado",
            ],
        ),
        (
            IncidentCategory::WeatherAlert,
            &[
                "huracán",
                "tormenta",
                "lluvia",
                "inundación",
                "viento",
                "clima",
                "meteorológica",
                "climático",
            ],
        ),
        (
            IncidentCategory::TrafficMeasure,
            &[
                "tránsito",
                "movilidad",
                "velocidad",
                "mejora",
                "restricción",
                "giro a la izquierda",
            ],
        ),
        (
            IncidentCategory::Event,
            &[
                "premio",
                "festival",
                "lanzó",
                "reconocimiento",
                "postulaciones",
                "evento",
            ],
        ),
    ];
    table
        .iter()
        .map(|(category, words)| {
            (
                *category,
                words.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
            )
        })
        .collect()
}

impl AnalyzerConfig {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_overrides(ConfigOverrides::default())
    }

    pub fn with_overrides(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let mut lead_patterns = Vec::with_capacity(DEFAULT_LEAD_PATTERNS.len());
        for (pattern, terminators, span) in DEFAULT_LEAD_PATTERNS {
            lead_patterns.push(LeadPattern::compile(pattern, terminators, *span)?);
        }
        if let Some(extra) = overrides.extra_patterns {
            for spec in extra {
                let terminators: Vec<&str> =
                    spec.terminators.iter().map(|t| t.as_str()).collect();
                let span = if spec.phrase_only {
                    MentionSpan::PhraseOnly
                } else {
                    MentionSpan::WholeMatch
                };
                lead_patterns.push(LeadPattern::compile(&spec.pattern, &terminators, span)?);
            }
        }

        let km_regex = Regex::new(KM_PATTERN).map_err(|e| ConfigError::InvalidPattern {
            pattern: KM_PATTERN.to_string(),
            reason: e.to_string(),
        })?;

        let lowercase_list = |values: Vec<String>| -> Vec<String> {
            values.into_iter().map(|v| v.to_lowercase()).collect()
        };
        let defaults = |values: &[&str]| -> Vec<String> {
            values.iter().map(|v| v.to_string()).collect()
        };

        Ok(Self {
            gazetteer: overrides
                .gazetteer
                .map(lowercase_list)
                .unwrap_or_else(|| defaults(DEFAULT_GAZETTEER)),
            lead_patterns,
            km_regex,
            categories: default_categories(),
            high_severity: overrides
                .high_severity
                .map(lowercase_list)
                .unwrap_or_else(|| defaults(DEFAULT_HIGH_SEVERITY)),
            medium_severity: overrides
                .medium_severity
                .map(lowercase_list)
                .unwrap_or_else(|| defaults(DEFAULT_MEDIUM_SEVERITY)),
            urgency_markers: overrides
                .urgency_markers
                .map(lowercase_list)
                .unwrap_or_else(|| defaults(DEFAULT_URGENCY_MARKERS)),
            alert_override: overrides
                .alert_override
                .map(lowercase_list)
                .unwrap_or_else(|| defaults(DEFAULT_ALERT_OVERRIDE)),
        })
    }

    /// Loads overrides from a JSON file and merges them over the defaults.
    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let raw = std::fs::read_to_string(path)?;
        let overrides: ConfigOverrides =
            serde_json::from_str(&raw).map_err(ConfigError::Parse)?;
        Ok(Self::with_overrides(overrides)?)
    }

    pub fn gazetteer(&self) -> &[String] {
        &self.gazetteer
    }

    pub fn lead_patterns(&self) -> &[LeadPattern] {
        &self.lead_patterns
    }

    pub fn km_regex(&self) -> &Regex {
        &self.km_regex
    }

    pub fn categories(&self) -> &[(IncidentCategory, Vec<String>)] {
        &self.categories
    }

    pub fn high_severity(&self) -> &[String] {
        &self.high_severity
    }

    pub fn medium_severity(&self) -> &[String] {
        &self.medium_severity
    }

    pub fn urgency_markers(&self) -> &[String] {
        &self.urgency_markers
    }

    pub fn alert_override(&self) -> &[String] {
        &self.alert_override
    }
}
