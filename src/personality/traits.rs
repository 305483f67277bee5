//! Key traits and nicknames per MBTI type

use super::MbtiType;

/// Short nickname commonly used for a type
pub fn nickname(mbti: &MbtiType) -> &'static str {
    match mbti.as_string().as_str() {
        "INTJ" => "Architect",
        "INTP" => "Logician",
        "ENTJ" => "Commander",
        "ENTP" => "Debater",
        "INFJ" => "Advocate",
        "INFP" => "Mediator",
        "ENFJ" => "Protagonist",
        "ENFP" => "Campaigner",
        "ISTJ" => "Logistician",
        "ISFJ" => "Defender",
        "ESTJ" => "Executive",
        "ESFJ" => "Consul",
        "ISTP" => "Virtuoso",
        "ISFP" => "Adventurer",
        "ESTP" => "Entrepreneur",
        _ => "Entertainer",
    }
}

/// Get personality traits for a given MBTI type
pub fn traits_for(mbti: &MbtiType) -> Vec<String> {
    let traits: &[&str] = match mbti.as_string().as_str() {
        "INTJ" => &[
            "Strategic thinker",
            "Independent",
            "Analytical",
            "Innovative",
            "Future-focused",
        ],
        "INTP" => &[
            "Logical",
            "Curious",
            "Theoretical",
            "Problem solver",
            "Analytical",
        ],
        "ENTJ" => &[
            "Natural leader",
            "Strategic",
            "Decisive",
            "Efficient",
            "Goal-oriented",
        ],
        "ENTP" => &[
            "Innovative",
            "Entrepreneurial",
            "Debater",
            "Quick thinker",
            "Versatile",
        ],
        "INFJ" => &[
            "Insightful",
            "Idealistic",
            "Compassionate",
            "Creative",
            "Purposeful",
        ],
        "INFP" => &[
            "Idealistic",
            "Empathetic",
            "Creative",
            "Open-minded",
            "Value-driven",
        ],
        "ENFJ" => &[
            "Charismatic",
            "Inspiring",
            "Empathetic",
            "Organized",
            "Persuasive",
        ],
        "ENFP" => &[
            "Enthusiastic",
            "Creative",
            "Sociable",
            "Spontaneous",
            "Optimistic",
        ],
        "ISTJ" => &[
            "Responsible",
            "Organized",
            "Practical",
            "Detail-oriented",
            "Reliable",
        ],
        "ISFJ" => &[
            "Caring",
            "Loyal",
            "Practical",
            "Detail-oriented",
            "Supportive",
        ],
        "ESTJ" => &[
            "Organized",
            "Practical",
            "Direct",
            "Efficient",
            "Traditional",
        ],
        "ESFJ" => &["Caring", "Social", "Organized", "Cooperative", "Supportive"],
        "ISTP" => &[
            "Practical",
            "Hands-on",
            "Logical",
            "Adaptable",
            "Problem solver",
        ],
        "ISFP" => &[
            "Artistic",
            "Gentle",
            "Flexible",
            "Sensitive",
            "Present-focused",
        ],
        "ESTP" => &[
            "Energetic",
            "Action-oriented",
            "Pragmatic",
            "Sociable",
            "Risk-taker",
        ],
        _ => &[
            "Outgoing",
            "Spontaneous",
            "Playful",
            "Enthusiastic",
            "People-focused",
        ],
    };

    traits.iter().map(|t| (*t).to_string()).collect()
}
