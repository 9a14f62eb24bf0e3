use std::collections::{HashMap, HashSet};

use crate::core::types::{DiseaseName, SymptomId};

/// Hand-curated symptoms that point almost uniquely to a few diseases.
///
/// The key `foul_smell_of urine` is spelled exactly as it appears in the
/// upstream symptom vocabulary.
const CRITICAL_SYMPTOM_DISEASES: &[(&str, &[&str])] = &[
    ("patches_in_throat", &["AIDS"]),
    ("extra_marital_contacts", &["AIDS"]),
    ("blackheads", &["Acne"]),
    ("pus_filled_pimples", &["Acne", "Impetigo"]),
    ("swelling_of_stomach", &["Alcoholic hepatitis"]),
    ("history_of_alcohol_consumption", &["Alcoholic hepatitis"]),
    ("watering_from_eyes", &["Allergy", "Common Cold"]),
    ("continuous_sneezing", &["Allergy", "Common Cold"]),
    ("swelling_joints", &["Arthritis"]),
    ("painful_walking", &["Arthritis", "Osteoarthritis"]),
    ("mucoid_sputum", &["Bronchial Asthma"]),
    ("family_history", &["Bronchial Asthma", "Diabetes"]),
    (
        "breathlessness",
        &["Bronchial Asthma", "Pneumonia", "Heart attack"],
    ),
    (
        "loss_of_balance",
        &["Cervical spondylosis", "Paroxysmal Positional Vertigo"],
    ),
    ("red_spots_over_body", &["Chicken pox", "Dengue"]),
    (
        "yellowing_of_eyes",
        &[
            "Chronic cholestasis",
            "Hepatitis A",
            "Hepatitis B",
            "Hepatitis C",
            "Hepatitis D",
            "Hepatitis E",
            "Jaundice",
        ],
    ),
    ("loss_of_taste", &["Covid"]),
    ("loss_of_smell", &["Covid"]),
    ("pain_behind_the_eyes", &["Dengue"]),
    ("blurred_and_distorted_vision", &["Diabetes", "Hypoglycemia"]),
    (
        "excessive_hunger",
        &["Diabetes", "Hyperthyroidism", "Hypoglycemia"],
    ),
    ("polyuria", &["Diabetes"]),
    (
        "pain_during_bowel_movements",
        &["Dimorphic hemorrhoids(piles)"],
    ),
    ("bloody_stool", &["Dimorphic hemorrhoids(piles)"]),
    (
        "burning_micturition",
        &["Drug Reaction", "Urinary tract infection"],
    ),
    ("spotting_urination", &["Drug Reaction"]),
    ("dyschromic_patches", &["Fungal infection"]),
    ("acidity", &["GERD", "Peptic ulcer disease"]),
    ("chest_pain", &["GERD", "Heart attack", "Pneumonia"]),
    ("dehydration", &["Gastroenteritis"]),
    ("fluid_overload", &["Alcoholic hepatitis"]),
    ("coma", &["Hepatitis E"]),
    ("stomach_bleeding", &["Hepatitis E"]),
    ("lack_of_concentration", &["Hypertension"]),
    ("fast_heart_rate", &["Hyperthyroidism", "Pneumonia"]),
    (
        "abnormal_menstruation",
        &["Hyperthyroidism", "Hypothyroidism"],
    ),
    ("drying_and_tingling_lips", &["Hypoglycemia"]),
    ("slurred_speech", &["Hypoglycemia"]),
    ("cold_hands_and_feet", &["Hypothyroidism"]),
    ("brittle_nails", &["Hypothyroidism"]),
    ("puffy_face_and_eyes", &["Hypothyroidism"]),
    ("enlarged_thyroid", &["Hypothyroidism"]),
    ("blister", &["Impetigo"]),
    ("red_sore_around_nose", &["Impetigo"]),
    ("yellow_crust_ooze", &["Impetigo"]),
    ("rusty_sputum", &["Pneumonia"]),
    ("altered_sensorium", &["Paralysis (brain hemorrhage)"]),
    ("spinning_movements", &["Paroxysmal Positional Vertigo"]),
    ("passage_of_gases", &["Peptic ulcer disease"]),
    ("internal_itching", &["Peptic ulcer disease"]),
    ("silver_like_dusting", &["Psoriasis"]),
    ("small_dents_in_nails", &["Psoriasis"]),
    ("inflammatory_nails", &["Psoriasis"]),
    ("blood_in_sputum", &["Tuberculosis"]),
    ("foul_smell_of urine", &["Urinary tract infection"]),
    ("continuous_feel_of_urine", &["Urinary tract infection"]),
    ("prominent_veins_on_calf", &["Varicose veins"]),
    ("swollen_blood_vessels", &["Varicose veins"]),
];

/// Mapping from strongly indicative symptoms to the diseases they point at.
///
/// Never derived from the tabular sources.
#[derive(Debug, Clone)]
pub struct CriticalIndex {
    symptom_to_diseases: HashMap<SymptomId, Vec<DiseaseName>>,
}

/// Diseases flagged by the critical symptoms of a query
#[derive(Debug, Clone, Default)]
pub struct CriticalHits {
    /// Every disease reachable from any input symptom
    pub diseases: HashSet<DiseaseName>,

    /// Which input symptoms triggered each disease, in input order
    pub triggers: HashMap<DiseaseName, Vec<SymptomId>>,
}

impl CriticalHits {
    #[must_use]
    pub fn contains(&self, disease: &str) -> bool {
        self.diseases.contains(disease)
    }
}

impl CriticalIndex {
    /// The built-in curated index
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_pairs(CRITICAL_SYMPTOM_DISEASES)
    }

    /// Build an index from explicit pairs (used for synthetic test fixtures)
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &[&str])]) -> Self {
        let symptom_to_diseases = pairs
            .iter()
            .map(|(symptom, diseases)| {
                (
                    (*symptom).to_string(),
                    diseases.iter().map(|d| (*d).to_string()).collect(),
                )
            })
            .collect();
        Self {
            symptom_to_diseases,
        }
    }

    /// Diseases a symptom strongly indicates, if it is critical
    #[must_use]
    pub fn diseases_for(&self, symptom: &str) -> Option<&[DiseaseName]> {
        self.symptom_to_diseases.get(symptom).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, symptom: &str) -> bool {
        self.symptom_to_diseases.contains_key(symptom)
    }

    /// Specificity weight `1 / (n + 1)` where `n` is the number of diseases the
    /// symptom points to; `None` for non-critical symptoms.
    #[must_use]
    pub fn specificity(&self, symptom: &str) -> Option<f64> {
        self.diseases_for(symptom).map(|diseases| {
            #[allow(clippy::cast_precision_loss)]
            let n = diseases.len() as f64;
            1.0 / (n + 1.0)
        })
    }

    /// Collect the critical diseases reachable from a set of input symptoms
    #[must_use]
    pub fn hits<S: AsRef<str>>(&self, symptoms: &[S]) -> CriticalHits {
        let mut hits = CriticalHits::default();
        for symptom in symptoms {
            let symptom = symptom.as_ref();
            let Some(diseases) = self.diseases_for(symptom) else {
                continue;
            };
            for disease in diseases {
                hits.diseases.insert(disease.clone());
                hits.triggers
                    .entry(disease.clone())
                    .or_default()
                    .push(symptom.to_string());
            }
        }
        hits
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symptom_to_diseases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symptom_to_diseases.is_empty()
    }
}

impl Default for CriticalIndex {
    fn default() -> Self {
        Self::builtin()
    }
}
