//! Weighted job scorer
//!
//! Every job starts at zero. Each rule tests one or two tone labels or a
//! speaking-rate band and adds a fixed weight to one job; rules are
//! independent and cumulative. Jobs are ranked by score (declaration order
//! for equal scores) and the top three kept. When the top two are exactly
//! tied, the three are re-ranked by a 16-bit key mixing the content seed with
//! each job name, so the winner depends on the file rather than on iteration
//! order.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

use crate::features::FeatureVector;
use crate::picker::ContentSeed;
use crate::profile::ToneLabel::{self, *};
use crate::profile::ToneProfile;

/// Rate proxy at or above this counts as fast
pub const FAST_RATE: f64 = 120.0;
/// Rate proxy at or below this counts as slow
pub const SLOW_RATE: f64 = 95.0;
/// Exclusive bounds of the mid-speed band (overlaps the fast band)
pub const MID_RATE_BOUNDS: (f64, f64) = (95.0, 130.0);

/// Number of candidates reported
pub const TOP_CANDIDATES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Job {
    Announcer,
    Mc,
    AudiobookNarrator,
    Actor,
    Youtuber,
    Counselor,
    VoiceActor,
    Singer,
    Teacher,
    Podcaster,
    Lecturer,
    Interpreter,
    RadioDj,
}

impl Job {
    /// Candidate order; equal scores keep this order before any tie-break
    pub const ALL: [Job; 13] = [
        Job::Announcer,
        Job::Mc,
        Job::AudiobookNarrator,
        Job::Actor,
        Job::Youtuber,
        Job::Counselor,
        Job::VoiceActor,
        Job::Singer,
        Job::Teacher,
        Job::Podcaster,
        Job::Lecturer,
        Job::Interpreter,
        Job::RadioDj,
    ];

    /// Display name sent to the front end (also the tie-break hash input)
    pub fn name(&self) -> &'static str {
        match self {
            Job::Announcer => "아나운서",
            Job::Mc => "MC",
            Job::AudiobookNarrator => "오디오북 내레이터",
            Job::Actor => "배우",
            Job::Youtuber => "유튜버",
            Job::Counselor => "상담사",
            Job::VoiceActor => "성우",
            Job::Singer => "가수",
            Job::Teacher => "교사",
            Job::Podcaster => "팟캐스터",
            Job::Lecturer => "강사",
            Job::Interpreter => "통역사",
            Job::RadioDj => "라디오 DJ",
        }
    }

    /// Fixed justification shown with the winning job
    pub fn reason(&self) -> &'static str {
        match self {
            Job::Announcer => "또렷한 발음과 흔들림 없는 톤이 뉴스 데스크에 딱 어울려요.",
            Job::Mc => "빠른 템포와 넘치는 에너지로 무대 분위기를 이끌 수 있어요.",
            Job::AudiobookNarrator => "차분하고 부드러운 호흡이 긴 이야기도 편안하게 들려줘요.",
            Job::Actor => "감정에 따라 변하는 억양이 캐릭터에 생동감을 불어넣어요.",
            Job::Youtuber => "밝은 에너지와 선명한 전달력이 시청자를 붙잡아요.",
            Job::Counselor => "부드럽고 안정적인 목소리가 상대의 마음을 편하게 해줘요.",
            Job::VoiceActor => "맑은 음색과 표현력으로 다양한 캐릭터를 소화할 수 있어요.",
            Job::Singer => "맑고 높은 음색이 멜로디를 얹기 좋은 목소리예요.",
            Job::Teacher => "안정적인 톤이 설명을 귀에 쏙쏙 들어오게 해요.",
            Job::Podcaster => "편안한 음색과 자연스러운 억양이 오래 들어도 질리지 않아요.",
            Job::Lecturer => "힘 있는 에너지로 강의실 끝까지 목소리를 전달해요.",
            Job::Interpreter => "일정한 속도와 명료한 발음이 정확한 전달에 유리해요.",
            Job::RadioDj => "잔잔하고 포근한 음색이 심야 라디오와 잘 어울려요.",
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Job {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Speaking-rate band tested by job rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateBand {
    Fast,
    Slow,
    Mid,
}

impl RateBand {
    pub fn contains(&self, rate: f64) -> bool {
        match self {
            RateBand::Fast => rate >= FAST_RATE,
            RateBand::Slow => rate <= SLOW_RATE,
            RateBand::Mid => rate > MID_RATE_BOUNDS.0 && rate < MID_RATE_BOUNDS.1,
        }
    }
}

/// What a job rule tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Has(ToneLabel),
    Both(ToneLabel, ToneLabel),
    Rate(RateBand),
}

impl Condition {
    fn holds(&self, profile: &ToneProfile, speaking_rate: f64) -> bool {
        match *self {
            Condition::Has(label) => profile.contains(label),
            Condition::Both(a, b) => profile.contains(a) && profile.contains(b),
            Condition::Rate(band) => band.contains(speaking_rate),
        }
    }
}

/// Additive scoring rule
#[derive(Debug, Clone, Copy)]
pub struct JobRule {
    pub job: Job,
    pub when: Condition,
    pub weight: f64,
}

const fn has(job: Job, label: ToneLabel, weight: f64) -> JobRule {
    JobRule { job, when: Condition::Has(label), weight }
}

const fn both(job: Job, a: ToneLabel, b: ToneLabel, weight: f64) -> JobRule {
    JobRule { job, when: Condition::Both(a, b), weight }
}

const fn rate(job: Job, band: RateBand, weight: f64) -> JobRule {
    JobRule { job, when: Condition::Rate(band), weight }
}

pub static JOB_RULES: [JobRule; 41] = [
    has(Job::Announcer, ClearVoice, 2.5),
    has(Job::Announcer, StableTone, 2.0),
    has(Job::Announcer, MidEnergy, 1.0),
    rate(Job::Announcer, RateBand::Mid, 1.0),
    // MC needs speed and energy together
    both(Job::Mc, HighEnergy, DynamicTone, 2.0),
    rate(Job::Mc, RateBand::Fast, 2.0),
    has(Job::Mc, ClearVoice, 1.0),
    has(Job::AudiobookNarrator, LowEnergy, 2.0),
    has(Job::AudiobookNarrator, SoftVoice, 2.0),
    has(Job::AudiobookNarrator, StableTone, 1.0),
    rate(Job::AudiobookNarrator, RateBand::Slow, 1.5),
    has(Job::Actor, DynamicTone, 2.0),
    has(Job::Actor, HuskyVoice, 1.0),
    has(Job::Actor, HighEnergy, 0.5),
    has(Job::Youtuber, HighEnergy, 1.5),
    has(Job::Youtuber, ClearVoice, 1.0),
    has(Job::Youtuber, DynamicTone, 1.0),
    has(Job::Counselor, SoftVoice, 2.0),
    has(Job::Counselor, StableTone, 1.0),
    has(Job::Counselor, LowEnergy, 1.0),
    has(Job::VoiceActor, ClearVoice, 2.0),
    has(Job::VoiceActor, DynamicTone, 1.0),
    has(Job::VoiceActor, MidEnergy, 1.0),
    has(Job::Singer, ClearVoice, 1.0),
    has(Job::Singer, HighPitch, 1.0),
    has(Job::Singer, DynamicTone, 0.5),
    has(Job::Teacher, StableTone, 2.0),
    has(Job::Teacher, MidEnergy, 1.0),
    has(Job::Podcaster, DynamicTone, 1.0),
    has(Job::Podcaster, SoftVoice, 1.0),
    has(Job::Podcaster, MidEnergy, 0.5),
    has(Job::Lecturer, HighEnergy, 2.0),
    rate(Job::Lecturer, RateBand::Fast, 1.0),
    has(Job::Lecturer, ClearVoice, 0.5),
    has(Job::Interpreter, ClearVoice, 1.0),
    has(Job::Interpreter, StableTone, 1.0),
    rate(Job::Interpreter, RateBand::Mid, 1.0),
    has(Job::Interpreter, LowEnergy, 0.5),
    has(Job::RadioDj, SoftVoice, 1.0),
    has(Job::RadioDj, LowEnergy, 0.5),
    has(Job::RadioDj, StableTone, 0.5),
];

/// One ranked candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JobCandidate {
    pub job: Job,
    /// Accumulated weight rounded to two decimals
    pub score: f64,
}

/// Scorer output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobMatch {
    pub best: Job,
    pub reason: &'static str,
    pub candidates: Vec<JobCandidate>,
    /// True when the content seed decided between equal top scores
    #[serde(skip)]
    pub tie_broken: bool,
}

/// Accumulate rule weights for every job, in [`Job::ALL`] order
pub fn raw_scores(profile: &ToneProfile, features: &FeatureVector) -> Vec<(Job, f64)> {
    let mut scores: Vec<(Job, f64)> = Job::ALL.iter().map(|job| (*job, 0.0)).collect();
    for rule in JOB_RULES.iter() {
        if rule.when.holds(profile, features.speaking_rate) {
            if let Some(entry) = scores.iter_mut().find(|(job, _)| *job == rule.job) {
                entry.1 += rule.weight;
            }
        }
    }
    scores
}

/// Rank jobs for a profile and pick the best match
///
/// Without a seed, exact ties keep declaration order.
pub fn score_jobs(
    profile: &ToneProfile,
    features: &FeatureVector,
    seed: Option<&ContentSeed>,
) -> JobMatch {
    let mut ranked = raw_scores(profile, features);
    // Stable: equal scores keep declaration order
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(TOP_CANDIDATES);

    let mut tie_broken = false;
    if let Some(seed) = seed {
        if ranked.len() > 1 && ranked[0].1 == ranked[1].1 {
            ranked.sort_by(|a, b| {
                b.1.partial_cmp(&a.1)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| {
                        seed.tiebreak_key(b.0.name())
                            .cmp(&seed.tiebreak_key(a.0.name()))
                    })
            });
            tie_broken = true;
        }
    }

    let best = ranked.first().map(|(job, _)| *job).unwrap_or(Job::RadioDj);
    let candidates = ranked
        .iter()
        .map(|(job, score)| JobCandidate {
            job: *job,
            score: (score * 100.0).round() / 100.0,
        })
        .collect();

    debug!(
        best = %best,
        tie_broken,
        "Scored job candidates"
    );

    JobMatch {
        best,
        reason: best.reason(),
        candidates,
        tie_broken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::classify;

    fn features(pitch: f64, energy: f64, hnr: f64, cents: f64, rate: f64) -> FeatureVector {
        FeatureVector {
            pitch_hz: pitch,
            energy,
            harmonicity_db: hnr,
            pitch_std_cents: Some(cents),
            speaking_rate: rate,
            ..FeatureVector::default()
        }
    }

    fn score(f: &FeatureVector, seed: Option<&ContentSeed>) -> JobMatch {
        score_jobs(&classify(f), f, seed)
    }

    #[test]
    fn test_rate_bands() {
        assert!(RateBand::Fast.contains(120.0));
        assert!(!RateBand::Fast.contains(119.9));
        assert!(RateBand::Slow.contains(95.0));
        assert!(!RateBand::Mid.contains(95.0));
        assert!(RateBand::Mid.contains(125.0));
        assert!(RateBand::Fast.contains(125.0));
        assert!(!RateBand::Mid.contains(130.0));
        assert!(!RateBand::Mid.contains(f64::NAN));
    }

    #[test]
    fn test_every_job_has_a_rule() {
        for job in Job::ALL {
            assert!(JOB_RULES.iter().any(|r| r.job == job && r.weight > 0.0), "{}", job);
        }
    }

    #[test]
    fn test_neutral_voice_scores() {
        // mid pitch, mid energy, soft, stable, mid speed
        let f = features(150.0, 0.5, 5.0, 60.0, 110.0);
        let scores = raw_scores(&classify(&f), &f);
        let get = |job: Job| scores.iter().find(|(j, _)| *j == job).unwrap().1;

        assert_eq!(get(Job::Announcer), 4.0);
        assert_eq!(get(Job::AudiobookNarrator), 3.0);
        assert_eq!(get(Job::Counselor), 3.0);
        assert_eq!(get(Job::Teacher), 3.0);
        assert_eq!(get(Job::Interpreter), 2.0);
        assert_eq!(get(Job::Podcaster), 1.5);
        assert_eq!(get(Job::RadioDj), 1.5);
        assert_eq!(get(Job::Mc), 0.0);

        let result = score_jobs(&classify(&f), &f, None);
        assert_eq!(result.best, Job::Announcer);
        assert_eq!(result.reason, Job::Announcer.reason());
        let jobs: Vec<_> = result.candidates.iter().map(|c| c.job).collect();
        assert_eq!(jobs, vec![Job::Announcer, Job::AudiobookNarrator, Job::Counselor]);
        assert!(!result.tie_broken);
    }

    #[test]
    fn test_energetic_voice_prefers_mc() {
        let f = features(220.0, 0.85, 15.0, 150.0, 125.0);
        let result = score(&f, None);
        assert_eq!(result.best, Job::Mc);
        assert_eq!(result.candidates[0].score, 5.0);
    }

    // high energy, soft, stable, fast + mid speed: announcer, narrator,
    // counselor and lecturer all score 3.0
    fn tied_features() -> FeatureVector {
        features(150.0, 0.85, 5.0, 60.0, 125.0)
    }

    #[test]
    fn test_tie_without_seed_keeps_declaration_order() {
        let result = score(&tied_features(), None);
        let jobs: Vec<_> = result.candidates.iter().map(|c| c.job).collect();
        assert_eq!(jobs, vec![Job::Announcer, Job::AudiobookNarrator, Job::Counselor]);
        assert!(result.candidates.iter().all(|c| c.score == 3.0));
        assert!(!result.tie_broken);
    }

    #[test]
    fn test_tie_break_is_reproducible_per_seed() {
        let seed = ContentSeed::from_bytes(b"same recording bytes");
        let first = score(&tied_features(), Some(&seed));
        assert!(first.tie_broken);
        for _ in 0..5 {
            assert_eq!(score(&tied_features(), Some(&seed)), first);
        }
    }

    #[test]
    fn test_tie_break_only_reorders_tied_set() {
        let tied = [Job::Announcer, Job::AudiobookNarrator, Job::Counselor];
        let mut winners = std::collections::HashSet::new();
        for i in 0u32..64 {
            let seed = ContentSeed::from_bytes(&i.to_le_bytes());
            let result = score(&tied_features(), Some(&seed));
            assert!(tied.contains(&result.best));
            // Lecturer ties at 3.0 but was cut before the tie-break
            assert!(result.candidates.iter().all(|c| c.job != Job::Lecturer));
            winners.insert(result.best);
        }
        assert!(winners.len() > 1, "seed never changed the tied winner");
    }

    #[test]
    fn test_seed_never_changes_untied_winner() {
        let f = features(150.0, 0.5, 5.0, 60.0, 110.0);
        for i in 0u32..32 {
            let seed = ContentSeed::from_bytes(&i.to_le_bytes());
            let result = score(&f, Some(&seed));
            assert_eq!(result.best, Job::Announcer);
            assert!(!result.tie_broken);
        }
    }

    #[test]
    fn test_candidate_serialization() {
        let result = score(&features(150.0, 0.5, 5.0, 60.0, 110.0), None);
        let json = serde_json::to_value(&result.candidates).unwrap();
        assert_eq!(json[0]["job"], "아나운서");
        assert_eq!(json[0]["score"], 4.0);
    }
}
