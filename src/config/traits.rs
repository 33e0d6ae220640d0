use crate::error::ProvidenceError;
use serde::{Deserialize, Serialize};

/// One table of the configuration file: `[evolution]`, `[network]`, `[clustering]`, `[data]`
/// or `[metrics]`.
///
/// `Default` is the value a missing table or key falls back to, so the manifest reads its
/// defaults from there rather than repeating them.
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    /// Table name in the file, also the first segment of `PROVIDENCE__<SECTION>__<FIELD>`.
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), ProvidenceError>;
    fn to_manifest(&self) -> ConfigManifest;
}

/// Value shape of a configurable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Integer,
    Float,
    Bool,
    FloatList,
    StringList,
    /// One of the listed variant names.
    Choice(Vec<String>),
    /// Any ordered subset of the listed variant names, without repeats.
    ChoiceList(Vec<String>),
}

impl FieldKind {
    pub fn choice(options: &[&str]) -> Self {
        Self::Choice(options.iter().map(|o| o.to_string()).collect())
    }

    pub fn choice_list(options: &[&str]) -> Self {
        Self::ChoiceList(options.iter().map(|o| o.to_string()).collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigManifest {
    pub section: String,
    pub fields: Vec<FieldManifest>,
}

impl ConfigManifest {
    /// Builds the manifest of section `S`, taking every field's default from `S::default()`.
    /// Fields missing from the serialised default (e.g. an unset seed) default to null.
    pub fn for_section<S: ConfigSection>(mut fields: Vec<FieldManifest>) -> Self {
        let defaults = serde_json::to_value(S::default()).ok();
        for field in &mut fields {
            field.default = defaults
                .as_ref()
                .and_then(|d| d.get(&field.name))
                .cloned()
                .unwrap_or(serde_json::Value::Null);
        }

        Self {
            section: S::section_name().to_string(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldManifest> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldManifest {
    pub name: String,
    pub kind: FieldKind,
    pub default: serde_json::Value,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub description: String,
}

impl FieldManifest {
    pub fn new(name: &str, kind: FieldKind, range: Option<(f64, f64)>, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            default: serde_json::Value::Null,
            min: range.map(|(min, _)| min),
            max: range.map(|(_, max)| max),
            description: description.to_string(),
        }
    }
}

/// Probabilities and the r-dominance threshold all live in [0, 1].
pub(crate) fn check_probability(name: &str, value: f64) -> Result<(), ProvidenceError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ProvidenceError::Configuration(format!(
            "{} must be between 0 and 1: {}",
            name, value
        )));
    }
    Ok(())
}

/// Counts such as population size, cluster bounds and layer widths.
pub(crate) fn check_at_least(name: &str, value: usize, min: usize) -> Result<(), ProvidenceError> {
    if value < min {
        return Err(ProvidenceError::Configuration(format!(
            "{} must be at least {}: {}",
            name, min, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClusteringConfig, EvolutionConfig, MetricsConfig};

    #[test]
    fn test_manifest_defaults_come_from_section_default() {
        let manifest = EvolutionConfig::default().to_manifest();

        assert_eq!(manifest.section, "evolution");
        assert_eq!(manifest.field("population_size").unwrap().default, serde_json::json!(100));
        assert_eq!(manifest.field("seed").unwrap().default, serde_json::Value::Null);
    }

    #[test]
    fn test_choice_fields_list_their_options() {
        let clustering = ClusteringConfig::default().to_manifest();
        assert_eq!(
            clustering.field("initialiser").unwrap().kind,
            FieldKind::choice(&["Forgy", "PlusPlus"])
        );

        let metrics = MetricsConfig::default().to_manifest();
        let field = metrics.field("metrics").unwrap();
        assert_eq!(field.default, serde_json::json!(["LSD", "MMRE", "PRED25"]));
        assert!(matches!(&field.kind, FieldKind::ChoiceList(options) if options.len() == 5));
    }

    #[test]
    fn test_range_helpers() {
        assert!(check_probability("Crossover probability", 0.0).is_ok());
        assert!(check_probability("Crossover probability", 1.01).is_err());
        assert!(check_at_least("Hidden layers", 1, 1).is_ok());
        assert!(matches!(
            check_at_least("Population size", 2, 3),
            Err(ProvidenceError::Configuration(_))
        ));
    }
}
