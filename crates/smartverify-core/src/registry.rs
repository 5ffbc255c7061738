use serde::{Deserialize, Serialize};

use crate::checks::Check;

const RDF_PIPELINE: &[Check] = &[Check::ValidRdf, Check::RdfContentType, Check::Structure];
const VITAL_SIGNS_PIPELINE: &[Check] = &[
    Check::ValidRdf,
    Check::RdfContentType,
    Check::Structure,
    Check::Height,
    Check::BloodPressure,
];
const ALLERGY_PIPELINE: &[Check] = &[
    Check::ValidRdf,
    Check::RdfContentType,
    Check::AllergyStructure,
];
const JSON_PIPELINE: &[Check] = &[Check::ValidJson, Check::JsonContentType];
const PREFERENCES_PIPELINE: &[Check] = &[Check::Consistency];
const UNREGISTERED_PIPELINE: &[Check] = &[Check::Unknown];

/// Data models with a registered check pipeline.
///
/// Names outside the registry resolve to [`ModelId::Unregistered`] rather
/// than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelId {
    Allergy,
    AppManifest,
    Container,
    Demographics,
    Encounter,
    Fulfillment,
    Immunization,
    LabResult,
    Medication,
    Ontology,
    Problem,
    UserPreferences,
    VitalSigns,
    Unregistered,
}

impl ModelId {
    pub const REGISTERED: [Self; 13] = [
        Self::Allergy,
        Self::AppManifest,
        Self::Container,
        Self::Demographics,
        Self::Encounter,
        Self::Fulfillment,
        Self::Immunization,
        Self::LabResult,
        Self::Medication,
        Self::Ontology,
        Self::Problem,
        Self::UserPreferences,
        Self::VitalSigns,
    ];

    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::REGISTERED
            .into_iter()
            .find(|model| model.as_str() == name)
            .unwrap_or(Self::Unregistered)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allergy => "Allergy",
            Self::AppManifest => "AppManifest",
            Self::Container => "Container",
            Self::Demographics => "Demographics",
            Self::Encounter => "Encounter",
            Self::Fulfillment => "Fulfillment",
            Self::Immunization => "Immunization",
            Self::LabResult => "LabResult",
            Self::Medication => "Medication",
            Self::Ontology => "Ontology",
            Self::Problem => "Problem",
            Self::UserPreferences => "UserPreferences",
            Self::VitalSigns => "VitalSigns",
            Self::Unregistered => "Unregistered",
        }
    }

    /// Checks run for this model, in order.
    #[must_use]
    pub fn pipeline(self) -> &'static [Check] {
        match self {
            Self::Demographics
            | Self::Encounter
            | Self::Fulfillment
            | Self::Immunization
            | Self::LabResult
            | Self::Medication
            | Self::Ontology
            | Self::Problem => RDF_PIPELINE,
            Self::VitalSigns => VITAL_SIGNS_PIPELINE,
            Self::Allergy => ALLERGY_PIPELINE,
            Self::AppManifest | Self::Container => JSON_PIPELINE,
            Self::UserPreferences => PREFERENCES_PIPELINE,
            Self::Unregistered => UNREGISTERED_PIPELINE,
        }
    }
}
