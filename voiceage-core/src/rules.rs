//! Ordered rule tables and the category mapper
//!
//! A table is a list of `(required labels, value)` entries evaluated in
//! declaration order plus a mandatory default. Required subsets overlap, so
//! entry order is part of each table's meaning: moving an entry changes the
//! report.

use serde::Serialize;
use tracing::debug;

use crate::catalog::{self, AnimalCard, PersonalityCard, ANIMALS, PERSONALITIES};
use crate::error::Result;
use crate::picker::ContentSeed;
use crate::profile::ToneLabel::{self, *};
use crate::profile::ToneProfile;

/// One rule: fires when every required label is in the profile
#[derive(Debug, Clone, Copy)]
pub struct RuleEntry<T: 'static> {
    pub requires: &'static [ToneLabel],
    pub value: T,
}

/// Ordered first-match table with a fallback
#[derive(Debug, Clone, Copy)]
pub struct RuleTable<T: 'static> {
    pub name: &'static str,
    pub entries: &'static [RuleEntry<T>],
    pub default: T,
}

impl<T: 'static> RuleTable<T> {
    /// First entry whose required labels are all present, else the default
    pub fn lookup(&self, profile: &ToneProfile) -> &T {
        self.entries
            .iter()
            .find(|entry| profile.contains_all(entry.requires))
            .map(|entry| &entry.value)
            .unwrap_or(&self.default)
    }

    /// Index of the matching entry, `None` when the default applies
    pub fn matching_index(&self, profile: &ToneProfile) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| profile.contains_all(entry.requires))
    }
}

const fn rule<T: 'static>(requires: &'static [ToneLabel], value: T) -> RuleEntry<T> {
    RuleEntry { requires, value }
}

pub static VOICE_TYPES: RuleTable<&str> = RuleTable {
    name: "voice_type",
    entries: &[
        rule(&[HighEnergy, DynamicTone], "활기찬 에너지 보이스"),
        rule(&[HighPitch, ClearVoice], "맑고 청량한 크리스탈 보이스"),
        rule(&[LowPitch, StableTone], "깊고 카리스마 있는 베이스 보이스"),
        rule(&[LowEnergy, SoftVoice], "차분하고 속삭이는 위스퍼 보이스"),
        rule(&[ClearVoice], "따뜻하고 부드러운 허니 보이스"),
        rule(&[HuskyVoice, HighEnergy], "파워풀하고 강렬한 썬더 보이스"),
        rule(&[MidEnergy, DynamicTone], "감성적이고 몽환적인 문라이트 보이스"),
    ],
    default: "시원하고 깔끔한 민트 보이스",
};

/// Yields animal card ids
pub static ANIMAL_TYPES: RuleTable<&str> = RuleTable {
    name: "animal_type",
    entries: &[
        rule(&[HighPitch, DynamicTone], "rabbit"),
        rule(&[HighPitch, LowEnergy], "cat"),
        rule(&[HighPitch, HighEnergy], "dog"),
        rule(&[LowPitch, HuskyVoice], "wolf"),
        rule(&[LowPitch, HighEnergy], "lion"),
        rule(&[MidPitch, StableTone], "bear"),
        rule(&[MidPitch, DynamicTone], "fox"),
    ],
    default: "hamster",
};

/// Yields personality card ids
pub static PERSONALITY_TYPES: RuleTable<&str> = RuleTable {
    name: "personality_type",
    entries: &[
        rule(&[HighEnergy, DynamicTone], "maker"),
        rule(&[LowEnergy, StableTone], "stable"),
        rule(&[LowPitch, StableTone], "leader"),
        rule(&[HighPitch, DynamicTone], "artist"),
        rule(&[HighEnergy, ClearVoice], "active"),
        rule(&[HuskyVoice, DynamicTone], "humorous"),
        rule(&[ClearVoice, StableTone], "analytical"),
    ],
    default: "emotional",
};

pub static SPECIAL_TAGS: RuleTable<&str> = RuleTable {
    name: "special_tag",
    entries: &[
        rule(&[LowEnergy, SoftVoice], "ASMR 천재"),
        rule(&[ClearVoice, HighPitch], "귀호강 주인공"),
        rule(&[LowPitch, StableTone], "카리스마 폭발"),
        // soft and clear share an axis; kept for table compatibility
        rule(&[SoftVoice, ClearVoice], "목소리 꿀"),
        rule(&[HighEnergy, DynamicTone], "매력 발산기"),
        rule(&[HuskyVoice, LowPitch], "보이스 피셔"),
    ],
    default: "힐링 보이스",
};

pub static VOICE_COLORS: RuleTable<&str> = RuleTable {
    name: "voice_color",
    entries: &[
        rule(&[HighPitch, ClearVoice], "사파이어 블루"),
        rule(&[HighPitch, HighEnergy], "골든 옐로우"),
        rule(&[LowPitch, StableTone], "오닉스 블랙"),
        rule(&[LowPitch, HuskyVoice], "루비 레드"),
        rule(&[SoftVoice, MidPitch], "로즈 골드"),
        rule(&[ClearVoice, StableTone], "에메랄드 그린"),
        rule(&[DynamicTone, MidEnergy], "아메시스트 퍼플"),
    ],
    default: "실버 화이트",
};

/// Categorical half of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryMapping {
    pub voice_type: &'static str,
    pub animal_type: AnimalCard,
    pub personality_type: PersonalityCard,
    pub special_tag: &'static str,
    pub voice_color: &'static str,
}

/// Map a tone profile through every category table
///
/// A rule value naming a card missing from the catalog falls back to a card
/// picked from the content seed, never to a random one.
pub fn map_categories(profile: &ToneProfile, seed: &ContentSeed) -> Result<CategoryMapping> {
    let animal_id = *ANIMAL_TYPES.lookup(profile);
    let animal_type = match catalog::animal(animal_id) {
        Some(card) => *card,
        None => *seed.pick(&ANIMALS)?,
    };

    let personality_id = *PERSONALITY_TYPES.lookup(profile);
    let personality_type = match catalog::personality(personality_id) {
        Some(card) => *card,
        None => *seed.pick(&PERSONALITIES)?,
    };

    let mapping = CategoryMapping {
        voice_type: *VOICE_TYPES.lookup(profile),
        animal_type,
        personality_type,
        special_tag: *SPECIAL_TAGS.lookup(profile),
        voice_color: *VOICE_COLORS.lookup(profile),
    };

    debug!(
        profile = %profile,
        voice_type = mapping.voice_type,
        animal = mapping.animal_type.id,
        personality = mapping.personality_type.id,
        "Mapped tone profile to categories"
    );

    Ok(mapping)
}
