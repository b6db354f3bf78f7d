//! Analysis pipeline
//!
//! Feature vector → tone profile → {categories, job match}; independently
//! feature vector → radar → headline scores; the waveform feeds the quality
//! checks. Everything that needs pseudo-randomness reads the content seed
//! derived from the raw upload bytes.

use serde::Serialize;
use tracing::{debug, info};

use crate::age::{estimate_age, AgeBracket, Gender};
use crate::catalog::{self, AgeGroup, AnimalCard, PersonalityCard};
use crate::config::ScoringProfile;
use crate::diagnostics::diagnose;
use crate::error::{Error, Result};
use crate::features::FeatureVector;
use crate::jobs::{score_jobs, Job, JobCandidate};
use crate::picker::ContentSeed;
use crate::profile::{classify, ToneProfile};
use crate::radar::{calculate_attraction, calculate_uniqueness, normalize_radar, RadarEntry};
use crate::rules::map_categories;

/// Reported in every result as `version`
pub const API_VERSION: &str = "1.3.0";

/// Bracket used when the estimated one has no catalog entry
pub const FALLBACK_AGE_BRACKET: AgeBracket = AgeBracket::ThirtiesEarly;

/// Everything the pipeline needs for one request
#[derive(Debug, Clone, Copy)]
pub struct AnalysisInput<'a> {
    pub features: FeatureVector,
    /// Preprocessed mono waveform, only used for quality checks
    pub samples: &'a [f32],
    pub sample_rate: u32,
    /// Original upload bytes, only used for seeding
    pub raw_bytes: &'a [u8],
    pub gender: Gender,
}

/// The report, in wire field order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub version: &'static str,
    pub age_range: &'static str,
    pub humor_quote: &'static str,
    pub attraction_score: i32,
    pub uniqueness_score: i32,
    pub radar_data: Vec<RadarEntry>,
    pub warnings: Vec<String>,
    pub voice_type: &'static str,
    pub animal_type: AnimalCard,
    pub personality_type: PersonalityCard,
    pub compatibility_job: Job,
    pub job_reason: &'static str,
    pub job_candidates: Vec<JobCandidate>,
    pub special_tag: &'static str,
    pub voice_color: &'static str,

    #[serde(skip)]
    pub age_bracket: AgeBracket,
    #[serde(skip)]
    pub profile: ToneProfile,
}

/// Stateless report builder; one instance serves every request
#[derive(Debug, Clone, Copy, Default)]
pub struct VoiceAnalyzer {
    scoring: ScoringProfile,
}

impl VoiceAnalyzer {
    pub fn new(scoring: ScoringProfile) -> Self {
        Self { scoring }
    }

    pub fn scoring(&self) -> ScoringProfile {
        self.scoring
    }

    pub fn analyze(&self, input: &AnalysisInput<'_>) -> Result<AnalysisResult> {
        let features = &input.features;
        let seed = ContentSeed::from_bytes(input.raw_bytes);

        let profile = classify(features);
        debug!(
            profile = %profile,
            pitch_hz = features.pitch_hz,
            energy = features.energy,
            harmonicity_db = features.harmonicity_db,
            "Classified tone profile"
        );

        let categories = map_categories(&profile, &seed)?;
        let job = score_jobs(&profile, features, Some(&seed));

        let age_bracket = estimate_age(
            features.pitch_hz,
            features.spectral_centroid_hz,
            features.energy,
            input.gender,
        );
        let group = age_group_or_fallback(age_bracket)?;
        let humor_quote = *seed.pick(group.humor)?;

        let radar = normalize_radar(features, self.scoring.stability);
        let attraction_score = calculate_attraction(&radar);
        let uniqueness_score = calculate_uniqueness(features, &radar, self.scoring.uniqueness);

        let warnings = diagnose(input.samples, input.sample_rate);

        info!(
            age_bracket = %age_bracket,
            voice_type = categories.voice_type,
            job = %job.best,
            tie_broken = job.tie_broken,
            attraction_score,
            uniqueness_score,
            warnings = warnings.len(),
            "Voice analysis complete"
        );

        Ok(AnalysisResult {
            version: API_VERSION,
            age_range: group.range,
            humor_quote,
            attraction_score,
            uniqueness_score,
            radar_data: radar.to_vec(),
            warnings,
            voice_type: categories.voice_type,
            animal_type: categories.animal_type,
            personality_type: categories.personality_type,
            compatibility_job: job.best,
            job_reason: job.reason,
            job_candidates: job.candidates,
            special_tag: categories.special_tag,
            voice_color: categories.voice_color,
            age_bracket,
            profile,
        })
    }
}

fn age_group_or_fallback(bracket: AgeBracket) -> Result<&'static AgeGroup> {
    catalog::age_group(bracket)
        .or_else(|| catalog::age_group(FALLBACK_AGE_BRACKET))
        .ok_or(Error::Config(format!(
            "no age group for {} or fallback {}",
            bracket, FALLBACK_AGE_BRACKET
        )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_field_order() {
        let samples = vec![0.0f32; 22050];
        let input = AnalysisInput {
            features: FeatureVector::default(),
            samples: &samples,
            sample_rate: 22050,
            raw_bytes: b"field order",
            gender: Gender::Other,
        };
        let result = VoiceAnalyzer::default().analyze(&input).unwrap();
        let json = serde_json::to_string(&result).unwrap();

        let keys = [
            "\"version\"",
            "\"age_range\"",
            "\"humor_quote\"",
            "\"attraction_score\"",
            "\"uniqueness_score\"",
            "\"radar_data\"",
            "\"warnings\"",
            "\"voice_type\"",
            "\"animal_type\"",
            "\"personality_type\"",
            "\"compatibility_job\"",
            "\"job_reason\"",
            "\"job_candidates\"",
            "\"special_tag\"",
            "\"voice_color\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", json);
        assert!(!json.contains("age_bracket"));
        assert!(!json.contains("\"profile\""));
    }

    #[test]
    fn test_every_bracket_resolves() {
        for bracket in AgeBracket::ALL {
            assert_eq!(age_group_or_fallback(bracket).unwrap().bracket, bracket);
        }
    }
}
