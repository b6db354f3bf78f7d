//! # VoiceAge Core Library
//!
//! Deterministic mapping engine behind the voice personality report:
//! - Feature vector and tone profile classification
//! - Ordered rule tables for voice type, archetype, personality, tag, color
//! - Gender-conditioned age bracket ladder
//! - Weighted job scorer with content-seeded tie-break
//! - Radar/score normalization with versioned calibration
//! - Waveform quality diagnostics
//! - Content-hash deterministic picker
//!
//! Every component is a pure function of its inputs. The only per-request
//! state is the [`ContentSeed`] derived from the uploaded bytes.

pub mod age;
pub mod analysis;
pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod features;
pub mod jobs;
pub mod picker;
pub mod profile;
pub mod radar;
pub mod rules;

pub use age::{estimate_age, AgeBracket, Gender};
pub use analysis::{AnalysisInput, AnalysisResult, VoiceAnalyzer, API_VERSION};
pub use config::{ScoringProfile, StabilityCalibration, UniquenessFormula};
pub use diagnostics::{diagnose, QualityReport};
pub use error::{Error, Result};
pub use features::FeatureVector;
pub use jobs::{score_jobs, Job, JobCandidate, JobMatch};
pub use picker::{pick, ContentSeed};
pub use profile::{classify, ToneLabel, ToneProfile};
pub use radar::{calculate_attraction, calculate_uniqueness, normalize_radar, RadarAxis, RadarEntry};
pub use rules::{map_categories, CategoryMapping, RuleEntry, RuleTable};
