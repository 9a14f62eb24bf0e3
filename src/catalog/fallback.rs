//! Built-in reference tables substituted when a data file is missing or malformed.
//!
//! Each table replaces its resource in full; fallback data is never merged with
//! partially parsed file data.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::core::types::{DiseaseName, Severity, SymptomId};

/// Symptom vocabulary reported when the disease/symptom dataset is unavailable
pub const FALLBACK_SYMPTOMS: &[&str] = &[
    "itching",
    "skin_rash",
    "nodal_skin_eruptions",
    "continuous_sneezing",
    "shivering",
    "chills",
    "joint_pain",
    "stomach_pain",
    "acidity",
    "ulcers_on_tongue",
    "vomiting",
    "burning_micturition",
    "fatigue",
    "weight_loss",
    "cough",
    "high_fever",
    "breathlessness",
    "sweating",
    "headache",
    "yellowish_skin",
    "dark_urine",
    "nausea",
    "loss_of_appetite",
    "abdominal_pain",
    "diarrhoea",
    "mild_fever",
    "yellowing_of_eyes",
    "swelled_lymph_nodes",
    "malaise",
    "blurred_vision",
];

/// Disease to symptom mapping, in table order
pub const FALLBACK_DISEASES: &[(&str, &[&str])] = &[
    (
        "Fungal infection",
        &["itching", "skin_rash", "nodal_skin_eruptions"],
    ),
    (
        "Common Cold",
        &[
            "continuous_sneezing",
            "shivering",
            "chills",
            "watering_from_eyes",
        ],
    ),
    (
        "Influenza",
        &["high_fever", "sweating", "chills", "fatigue", "headache"],
    ),
    (
        "Typhoid",
        &["high_fever", "weakness", "abdominal_pain", "diarrhoea"],
    ),
    (
        "Malaria",
        &["chills", "vomiting", "high_fever", "sweating", "headache"],
    ),
    (
        "Pneumonia",
        &["chills", "cough", "high_fever", "breathlessness"],
    ),
    (
        "Gastroenteritis",
        &[
            "stomach_pain",
            "acidity",
            "ulcers_on_tongue",
            "vomiting",
            "diarrhoea",
        ],
    ),
];

pub const FALLBACK_DESCRIPTIONS: &[(&str, &str)] = &[
    (
        "Fungal infection",
        "A fungal infection that affects the skin, causing itching, rash, and nodular eruptions.",
    ),
    (
        "Common Cold",
        "A viral infectious disease of the upper respiratory tract which primarily affects the nose.",
    ),
    (
        "Influenza",
        "A viral infection that attacks your respiratory system: your nose, throat and lungs.",
    ),
    (
        "Typhoid",
        "A bacterial infection that can spread throughout the body, affecting many organs.",
    ),
    (
        "Malaria",
        "A serious and sometimes fatal disease caused by a parasite that commonly infects a certain type of mosquito.",
    ),
    (
        "Pneumonia",
        "An infection that inflames air sacs in one or both lungs, which may fill with fluid.",
    ),
    (
        "Gastroenteritis",
        "An intestinal infection marked by diarrhea, abdominal cramps, nausea or vomiting, and sometimes fever.",
    ),
];

pub const FALLBACK_PRECAUTIONS: &[(&str, &[&str])] = &[
    (
        "Fungal infection",
        &[
            "keep the affected area clean and dry",
            "use antifungal medications",
            "wear clean clothes",
            "avoid sharing personal items",
        ],
    ),
    (
        "Common Cold",
        &[
            "get plenty of rest",
            "stay hydrated",
            "use a humidifier",
            "take over-the-counter cold medications",
        ],
    ),
    (
        "Influenza",
        &[
            "get vaccinated",
            "wash hands frequently",
            "avoid close contact with sick people",
            "stay home if sick",
        ],
    ),
    (
        "Typhoid",
        &[
            "get vaccinated",
            "wash hands thoroughly",
            "avoid raw foods",
            "drink purified water",
        ],
    ),
    (
        "Malaria",
        &[
            "use mosquito nets",
            "use insect repellent",
            "take antimalarial drugs when traveling",
            "wear long sleeves and pants",
        ],
    ),
    (
        "Pneumonia",
        &[
            "get vaccinated",
            "practice good hygiene",
            "avoid smoking",
            "maintain a healthy immune system",
        ],
    ),
    (
        "Gastroenteritis",
        &[
            "stay hydrated",
            "rest",
            "avoid dairy products",
            "gradually reintroduce food",
        ],
    ),
];

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

#[must_use]
pub fn fallback_disease_map() -> IndexMap<DiseaseName, Vec<SymptomId>> {
    FALLBACK_DISEASES
        .iter()
        .map(|(disease, symptoms)| ((*disease).to_string(), to_strings(symptoms)))
        .collect()
}

/// Fallback symptom vocabulary, sorted
#[must_use]
pub fn fallback_symptoms() -> Vec<SymptomId> {
    let mut symptoms = to_strings(FALLBACK_SYMPTOMS);
    symptoms.sort_unstable();
    symptoms
}

#[must_use]
pub fn fallback_descriptions() -> HashMap<DiseaseName, String> {
    FALLBACK_DESCRIPTIONS
        .iter()
        .map(|(disease, text)| ((*disease).to_string(), (*text).to_string()))
        .collect()
}

#[must_use]
pub fn fallback_precautions() -> HashMap<DiseaseName, Vec<String>> {
    FALLBACK_PRECAUTIONS
        .iter()
        .map(|(disease, items)| ((*disease).to_string(), to_strings(items)))
        .collect()
}

/// There is no built-in severity data; every scorer applies its own default.
#[must_use]
pub fn fallback_severity() -> HashMap<SymptomId, Severity> {
    HashMap::new()
}

/// Look up a fallback description without building the whole table
#[must_use]
pub fn fallback_description_for(disease: &str) -> Option<&'static str> {
    FALLBACK_DESCRIPTIONS
        .iter()
        .find(|(name, _)| *name == disease)
        .map(|(_, text)| *text)
}

/// Look up fallback precautions without building the whole table
#[must_use]
pub fn fallback_precautions_for(disease: &str) -> Option<Vec<String>> {
    FALLBACK_PRECAUTIONS
        .iter()
        .find(|(name, _)| *name == disease)
        .map(|(_, items)| to_strings(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_tables_cover_same_diseases() {
        let diseases = fallback_disease_map();
        let descriptions = fallback_descriptions();
        let precautions = fallback_precautions();

        assert_eq!(diseases.len(), 7);
        for disease in diseases.keys() {
            assert!(descriptions.contains_key(disease), "{disease} lacks a description");
            assert!(precautions.contains_key(disease), "{disease} lacks precautions");
        }
    }

    #[test]
    fn test_fallback_disease_order_preserved() {
        let diseases = fallback_disease_map();
        let first = diseases.keys().next().unwrap();
        assert_eq!(first, "Fungal infection");
        assert_eq!(diseases.keys().last().unwrap(), "Gastroenteritis");
    }

    #[test]
    fn test_fallback_symptoms_sorted() {
        let symptoms = fallback_symptoms();
        assert_eq!(symptoms.len(), FALLBACK_SYMPTOMS.len());
        assert!(symptoms.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_fallback_lookups() {
        assert!(fallback_description_for("Malaria").is_some());
        assert!(fallback_description_for("Dengue").is_none());
        assert_eq!(fallback_precautions_for("Gastroenteritis").unwrap().len(), 4);
        assert!(fallback_severity().is_empty());
    }
}
