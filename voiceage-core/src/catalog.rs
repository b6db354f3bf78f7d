//! Read-only reference data for the report
//!
//! Process-lifetime statics: age bracket flavor pools, archetype and
//! personality cards, and the advisory warning texts. Display strings are
//! part of the wire contract with the front end.

use serde::Serialize;

use crate::age::AgeBracket;

/// Age bracket display range and its flavor quote pool
#[derive(Debug, Clone, Copy)]
pub struct AgeGroup {
    pub bracket: AgeBracket,
    pub range: &'static str,
    pub humor: &'static [&'static str],
}

/// Animal archetype card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnimalCard {
    #[serde(skip)]
    pub id: &'static str,
    #[serde(rename = "type")]
    pub label: &'static str,
    pub emoji: &'static str,
    pub desc: &'static str,
}

/// Personality card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PersonalityCard {
    #[serde(skip)]
    pub id: &'static str,
    #[serde(rename = "type")]
    pub label: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
}

pub static AGE_GROUPS: [AgeGroup; 8] = [
    AgeGroup {
        bracket: AgeBracket::Teens,
        range: "10대",
        humor: &[
            "목소리에서 '엄마 용돈 올려달라'는 간절함이 느껴져요! 🌸",
            "라면 끓이는 소리만 들어도 달려올 것 같은 목소리! ⚡",
            "밤 12시에 '숙제 언제 하지?' 하는 목소리네요! 📱",
            "청춘 드라마에서 '야, 너 좋아해' 고백할 목소리! 🎭",
            "새로 나온 줄임말을 일주일 만에 마스터할 것 같아요!",
            "에너지 드링크가 목소리로 변한 느낌!",
        ],
    },
    AgeGroup {
        bracket: AgeBracket::TwentiesEarly,
        range: "20대 초반",
        humor: &[
            "대학 과제 마감 2시간 전의 절망과 희망이 공존하는 목소리! 🎓",
            "밤새 팀플하고 '이번엔 진짜 A+ 받을 거야' 하는 목소리!",
            "MT에서 '우리 과 최고!' 외칠 목소리에요!",
            "'오늘 뭐 먹지?'가 인생 최대 고민인 목소리!",
            "개강파티 주최자 목소리네요!",
            "친구 번호 물어봐달라고 부탁받을 목소리!",
        ],
    },
    AgeGroup {
        bracket: AgeBracket::TwentiesLate,
        range: "20대 후반",
        humor: &[
            "이제 막 '어른'이라는 가면을 쓰기 시작한 목소리! 🍺",
            "퇴근길에 '오늘도 고생했다' 혼잣말할 목소리네요!",
            "첫 월급으로 '이제야 사람 됐다' 느끼는 목소리!",
            "주말 약속 없으면 인싸 자격 박탈당할 것 같은 목소리!",
            "연애할 때 가장 설레지만 현실은 솔로인 목소리 💕",
            "독립 후 '집에서 속옷만 입고 다니는 자유'를 만끽하는 목소리!",
        ],
    },
    AgeGroup {
        bracket: AgeBracket::ThirtiesEarly,
        range: "30대 초반",
        humor: &[
            "안정감은 있는데 여전히 게임 밤새는 목소리예요.",
            "넷플릭스 정주행이 최고의 힐링이라고 확신하는 목소리!",
            "'아, 허리야...' 첫 신음소리를 낸 목소리!",
            "회사에서 '믿고 맡길 수 있는' 목소리 💼",
            "결혼식 축사에서 웃음과 감동을 동시에 줄 목소리!",
            "커피 없으면 좀비가 되는 목소리 ☕",
        ],
    },
    AgeGroup {
        bracket: AgeBracket::ThirtiesLate,
        range: "30대 후반",
        humor: &[
            "깊이는 있는데 아직 유튜브 알고리즘에 당하는 목소리! 💰",
            "재테크 유튜브 보면서 '나도 부자 될 수 있어' 하는 목소리!",
            "육아 현실에 치여도 아이 앞에선 천사가 되는 목소리 👶",
            "캠핑 가서 '자연이 최고야' 하지만 와이파이 찾는 목소리!",
            "인생 황금기라지만 체력은 이미 하향곡선인 목소리! ✨",
            "'집이 천국'이라는 진리를 깨달은 목소리!",
        ],
    },
    AgeGroup {
        bracket: AgeBracket::FortiesEarly,
        range: "40대 초반",
        humor: &[
            "편안하지만 갑자기 '요즘 애들은...' 하고 싶어지는 목소리!",
            "와인 마시면서 '인생을 논하고' 싶어지는 목소리 🍷",
            "후배들에게 밥 사주면서 '내 젊었을 때는' 시전할 목소리!",
            "아이 숙제 도와주다가 '이게 뭐야?' 할 목소리 📝",
            "경험담이 레전드가 된 목소리 📚",
            "골프 치면서 '스트레스 푸는' 목소리!",
        ],
    },
    AgeGroup {
        bracket: AgeBracket::FortiesLate,
        range: "40대 후반",
        humor: &[
            "지혜롭지만 아직 스마트폰 기능을 다 모르는 목소리!",
            "'내가 너 때는...' 전설의 시작을 알리는 목소리!",
            "인생의 단맛을 아는 동시에 쓴맛도 아는 목소리!",
            "다큐 보면서 '역시 옛날이 좋았어' 할 목소리!",
            "가족여행 계획 세우는 게 취미가 된 목소리!",
            "친구 모임에서 '건강이 최고야' 외치는 목소리!",
        ],
    },
    AgeGroup {
        bracket: AgeBracket::FiftiesPlus,
        range: "50대 이상",
        humor: &[
            "모든 것을 다 겪어본 '인생 고수'의 여유로운 목소리!",
            "차 한 잔에 '인생 철학'을 담아낼 수 있는 목소리 🍵",
            "'이제야 진짜 내 인생이 시작이야' 하는 목소리 🎭",
            "손자 손녀에게 '옛날에 할아버지는...' 시전하는 목소리!",
            "등산복이 일상복이 된 목소리 🏔️",
            "텃밭에서 '내가 기른 배추가 최고야' 하는 목소리!",
        ],
    },
];

pub static ANIMALS: [AnimalCard; 8] = [
    AnimalCard { id: "cat", label: "고양이상", emoji: "🐱", desc: "츤데레의 완성체, 관심없는 척 하지만 사실 관종" },
    AnimalCard { id: "dog", label: "강아지상", emoji: "🐶", desc: "세상 모든 사람이 좋은 사람일 거라고 믿는 순수함" },
    AnimalCard { id: "bear", label: "곰상", emoji: "🐻", desc: "포근한 인간 담요, 안기고 싶게 만드는 마성의 체질" },
    AnimalCard { id: "fox", label: "여우상", emoji: "🦊", desc: "계산기보다 빠른 두뇌, 눈빛만으로 사람 홀리는 마법사" },
    AnimalCard { id: "hamster", label: "햄스터상", emoji: "🐹", desc: "입에 음식 가득 넣고도 귀여운 반칙급 외모" },
    AnimalCard { id: "lion", label: "사자상", emoji: "🦁", desc: "가만히 있어도 포스 폭발, 천상천하 유아독존" },
    AnimalCard { id: "rabbit", label: "토끼상", emoji: "🐰", desc: "깜찍함으로 세상을 정복하는 중, 보호본능 자극 전문가" },
    AnimalCard { id: "wolf", label: "늑대상", emoji: "🐺", desc: "야성미 철철 흘러넘치는 매력, 길들여지지 않는 자유로운 영혼" },
];

pub static PERSONALITIES: [PersonalityCard; 8] = [
    PersonalityCard { id: "leader", label: "타고난 리더형", emoji: "👑", color: "#f59e0b" },
    PersonalityCard { id: "emotional", label: "따뜻한 감성형", emoji: "💝", color: "#ec4899" },
    PersonalityCard { id: "maker", label: "분위기 메이커형", emoji: "🎉", color: "#8b5cf6" },
    PersonalityCard { id: "stable", label: "깊고 차분한 안정형", emoji: "🧘", color: "#06b6d4" },
    PersonalityCard { id: "humorous", label: "유머러스한 재미형", emoji: "😄", color: "#10b981" },
    PersonalityCard { id: "artist", label: "창의적인 아티스트형", emoji: "🎨", color: "#f97316" },
    PersonalityCard { id: "analytical", label: "지적이고 분석적인 형", emoji: "🤓", color: "#6366f1" },
    PersonalityCard { id: "active", label: "활동적인 스포츠형", emoji: "🏃", color: "#ef4444" },
];

/// Advisory text for a noisy recording
pub const WARN_NOISY: &str = "주변 소음이 커서 정확도가 떨어질 수 있어요.";
/// Advisory text for a clipped recording
pub const WARN_CLIPPED: &str = "입력이 클리핑되었습니다. 마이크 입력 레벨을 낮춰주세요.";
/// Advisory text for a recording with too little speech
pub const WARN_SILENT: &str = "무음 구간이 많습니다. 2초 이상 또박또박 말해주세요.";

/// Look up the display data for an age bracket
pub fn age_group(bracket: AgeBracket) -> Option<&'static AgeGroup> {
    AGE_GROUPS.iter().find(|group| group.bracket == bracket)
}

pub fn animal(id: &str) -> Option<&'static AnimalCard> {
    ANIMALS.iter().find(|card| card.id == id)
}

pub fn personality(id: &str) -> Option<&'static PersonalityCard> {
    PERSONALITIES.iter().find(|card| card.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_bracket_has_a_non_empty_pool() {
        for bracket in AgeBracket::ALL {
            let group = age_group(bracket).expect("bracket missing from catalog");
            assert!(!group.humor.is_empty(), "{:?} has no flavor quotes", bracket);
        }
    }

    #[test]
    fn test_card_ids_are_unique() {
        let mut ids: Vec<_> = ANIMALS.iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), ANIMALS.len());

        let mut ids: Vec<_> = PERSONALITIES.iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), PERSONALITIES.len());
    }

    #[test]
    fn test_animal_card_serializes_without_id() {
        let card = animal("fox").unwrap();
        let json = serde_json::to_value(card).unwrap();
        assert_eq!(json["type"], "여우상");
        assert_eq!(json["emoji"], "🦊");
        assert!(json.get("id").is_none());
    }
}
