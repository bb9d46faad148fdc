use serde::{Deserialize, Serialize};

use crate::detectors::DetectedPatterns;

/// Hand-authored percentile buckets: ascending `(inclusive upper bound,
/// percentile)` pairs, values past the last bound map to 99. These are fixed
/// editorial thresholds, not measurements of a real population.
const POSTING_THRESHOLDS: &[(usize, u8)] = &[
    (0, 0),
    (4, 10),
    (12, 25),
    (30, 50),
    (75, 75),
    (150, 90),
    (300, 97),
];

const ENGAGEMENT_THRESHOLDS: &[(usize, u8)] = &[
    (25, 5),
    (75, 15),
    (200, 30),
    (500, 50),
    (1000, 70),
    (2000, 85),
    (4000, 95),
];

const COFFEE_LIES_THRESHOLDS: &[(usize, u8)] = &[(0, 0), (3, 30), (10, 55), (20, 75), (40, 90)];

const GHOST_THRESHOLDS: &[(usize, u8)] = &[(0, 10), (1, 30), (3, 50), (5, 70), (10, 85)];

pub fn lookup_percentile(value: usize, thresholds: &[(usize, u8)]) -> u8 {
    for (max, percentile) in thresholds {
        if value <= *max {
            return *percentile;
        }
    }
    99
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentileStats {
    pub posting: u8,
    pub engagement: u8,
    pub coffee_lies: u8,
    pub ghost_factor: u8,
    pub is_loud: bool,
    pub is_active: bool,
}

pub fn calculate_percentiles(patterns: &DetectedPatterns) -> PercentileStats {
    let posting = lookup_percentile(patterns.total_posts, POSTING_THRESHOLDS);

    let engagement_total = patterns.total_messages + patterns.total_reactions;
    let engagement = lookup_percentile(engagement_total, ENGAGEMENT_THRESHOLDS);

    let coffee_lies_count = patterns.coffee_liar.as_ref().map_or(0, |c| c.mentions);
    let coffee_lies = lookup_percentile(coffee_lies_count, COFFEE_LIES_THRESHOLDS);

    let ghost_count = patterns.ghost.as_ref().map_or(0, |g| g.len());
    let ghost_factor = lookup_percentile(ghost_count, GHOST_THRESHOLDS);

    PercentileStats {
        posting,
        engagement,
        coffee_lies,
        ghost_factor,
        is_loud: posting >= 50,
        is_active: engagement >= 50,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArchetypeName {
    #[serde(rename = "THE OPERATOR")]
    Operator,
    #[serde(rename = "THE BROADCASTER")]
    Broadcaster,
    #[serde(rename = "THE WHISPERER")]
    Whisperer,
    #[serde(rename = "THE LURKER")]
    Lurker,
}

impl ArchetypeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchetypeName::Operator => "THE OPERATOR",
            ArchetypeName::Broadcaster => "THE BROADCASTER",
            ArchetypeName::Whisperer => "THE WHISPERER",
            ArchetypeName::Lurker => "THE LURKER",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archetype {
    pub name: ArchetypeName,
    pub quadrant: String,
    pub tagline: String,
    pub roast: String,
}

/// Total over the 2x2 (is_loud, is_active) space: every combination maps to
/// exactly one archetype.
pub fn archetype_for(is_loud: bool, is_active: bool) -> ArchetypeName {
    match (is_loud, is_active) {
        (true, true) => ArchetypeName::Operator,
        (true, false) => ArchetypeName::Broadcaster,
        (false, true) => ArchetypeName::Whisperer,
        (false, false) => ArchetypeName::Lurker,
    }
}

pub fn calculate_archetype(patterns: &DetectedPatterns) -> Archetype {
    let stats = calculate_percentiles(patterns);
    let name = archetype_for(stats.is_loud, stats.is_active);
    let (quadrant, tagline, roast) = match name {
        ArchetypeName::Operator => (
            "top-right",
            "Posts AND engages. Everywhere at once. Exhausting but effective.",
            "You're in everyone's feed and everyone's DMs. You've optimized \
             the platform like it's a video game. It's working. It's also a \
             lot. People see your name and feel tired. But also slightly \
             impressed. Mostly tired.",
        ),
        ArchetypeName::Broadcaster => (
            "top-left",
            "Posts constantly. Engagement from others: optional.",
            "You think the feed is your stage. Your audience is mostly bots \
             and former coworkers. You've never met a thought you didn't want \
             to share with 2,000 strangers. They're listening. Some of them. \
             Maybe.",
        ),
        ArchetypeName::Whisperer => (
            "bottom-right",
            "Never posts. But always in the DMs. Lowkey powerful.",
            "You never post but you're in everyone's inbox. Mysterious. \
             Possibly powerful. Definitely plotting something. Your network \
             has no idea what you look like but they've all gotten a 'quick \
             question' from you.",
        ),
        ArchetypeName::Lurker => (
            "bottom-left",
            "Watches everything. Says nothing. Professionally invisible.",
            "You see everything, say nothing, and have opinions about everyone \
             else's content. You'll screenshot this and send it to a coworker \
             instead of posting it publicly. We know you. We are you.",
        ),
    };
    Archetype {
        name,
        quadrant: quadrant.to_string(),
        tagline: tagline.to_string(),
        roast: roast.to_string(),
    }
}
