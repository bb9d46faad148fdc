use chrono::{Months, NaiveDate, NaiveDateTime, Timelike};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::dates::{format_month, is_in_year, parse_date};
use crate::rows::{ConnectionRow, MessageRow, ReactionRow, ShareRow, SocialExport};

const NAME_COLLECTION_MIN: usize = 5;
const NIGHT_OWL_MIN_PERCENT: f64 = 20.0;
const COFFEE_LIAR_MIN_MENTIONS: usize = 3;
const CONGRATS_BOT_MIN: usize = 30;
const COMPANY_STALKER_MIN: usize = 15;
const PANIC_RATIO_MIN: f64 = 3.0;
const GHOST_MIN_MESSAGES: usize = 5;
const GHOST_TOP_N: usize = 3;
const THOUGHT_LEADER_MIN: usize = 10;

const COFFEE_PHRASES: [&str; 11] = [
    "grab coffee",
    "get coffee",
    "coffee sometime",
    "grab lunch",
    "get lunch",
    "lunch sometime",
    "catch up",
    "meet up",
    "get together",
    "pick your brain",
    "chat sometime",
];

const SCHEDULING_PHRASES: [&str; 12] = [
    "calendar",
    "schedule",
    "available",
    "free on",
    "how about",
    "this week",
    "next week",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
];

const BUZZWORDS: [&str; 7] = [
    "learnings", "insights", "journey", "excited", "grateful", "humbled", "thrilled",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCollection {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightOwl {
    pub percentage: u32,
    pub late_messages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoffeeLiar {
    pub mentions: usize,
    pub follow_ups: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CongratsBot {
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyStalker {
    pub company: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanicNetworker {
    pub month: String,
    pub count: usize,
    pub average: usize,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostEntry {
    pub name: String,
    pub last_contact: NaiveDateTime,
    pub message_count: usize,
}

/// Placeholder shape: the export contract carries no comments table, so this
/// detector has no data source and is never emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyGuy {
    pub comments: usize,
    pub posts: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThoughtLeader {
    pub buzzword_count: usize,
    pub top_buzzword: String,
}

/// One record per analysis run: each detector is independently present or
/// absent, plus the four aggregate counters for the target year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedPatterns {
    pub name_collection: Option<NameCollection>,
    pub night_owl: Option<NightOwl>,
    pub coffee_liar: Option<CoffeeLiar>,
    pub congrats_bot: Option<CongratsBot>,
    pub company_stalker: Option<CompanyStalker>,
    pub panic_networker: Option<PanicNetworker>,
    pub ghost: Option<Vec<GhostEntry>>,
    pub reply_guy: Option<ReplyGuy>,
    pub thought_leader: Option<ThoughtLeader>,
    pub total_connections: usize,
    pub total_messages: usize,
    pub total_reactions: usize,
    pub total_posts: usize,
}

/// Run every detector over the rows of one target year. `today` anchors the
/// ghost cutoff; both are threaded explicitly so the whole pass is a pure
/// function of its arguments.
pub fn analyze_patterns(data: &SocialExport, target_year: i32, today: NaiveDate) -> DetectedPatterns {
    let connections: Vec<&ConnectionRow> = data
        .connections
        .iter()
        .filter(|c| is_in_year(parse_date(&c.connected_on), target_year))
        .collect();
    let messages: Vec<&MessageRow> = data
        .messages
        .iter()
        .filter(|m| is_in_year(parse_date(&m.date), target_year))
        .collect();
    let reactions: Vec<&ReactionRow> = data
        .reactions
        .iter()
        .filter(|r| is_in_year(parse_date(&r.date), target_year))
        .collect();
    let shares: Vec<&ShareRow> = data
        .shares
        .iter()
        .filter(|s| is_in_year(parse_date(&s.date), target_year))
        .collect();

    let user_messages: Vec<&MessageRow> = messages
        .iter()
        .copied()
        .filter(|m| m.from == data.user_name)
        .collect();

    DetectedPatterns {
        name_collection: detect_name_collection(&connections),
        night_owl: detect_night_owl(&user_messages),
        coffee_liar: detect_coffee_liar(&user_messages),
        congrats_bot: detect_congrats_bot(&reactions),
        company_stalker: detect_company_stalker(&connections),
        panic_networker: detect_panic_networker(&connections),
        ghost: detect_ghosts(&messages, &data.user_name, today),
        reply_guy: None,
        thought_leader: detect_thought_leader(&shares),
        total_connections: connections.len(),
        total_messages: user_messages.len(),
        total_reactions: reactions.len(),
        total_posts: shares.len(),
    }
}

/// Most-collected first name (case-sensitive, trimmed). Ties break toward
/// the lexicographically smaller name.
pub fn detect_name_collection(connections: &[&ConnectionRow]) -> Option<NameCollection> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for c in connections {
        let name = c.first_name.trim();
        if !name.is_empty() {
            *counts.entry(name).or_insert(0) += 1;
        }
    }
    let (name, count) = counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))?;
    if count >= NAME_COLLECTION_MIN {
        Some(NameCollection { name: name.to_string(), count })
    } else {
        None
    }
}

/// Fraction of the subject's own messages sent between 22:00 and 05:00.
/// The denominator is every subject-sent message of the year; rows whose
/// date string fails to re-parse simply cannot count as late.
pub fn detect_night_owl(messages: &[&MessageRow]) -> Option<NightOwl> {
    if messages.is_empty() {
        return None;
    }
    let late = messages
        .iter()
        .filter_map(|m| parse_date(&m.date))
        .filter(|d| d.hour() >= 22 || d.hour() < 5)
        .count();
    let percentage = (late as f64 / messages.len() as f64) * 100.0;
    if percentage >= NIGHT_OWL_MIN_PERCENT {
        Some(NightOwl {
            percentage: percentage.round() as u32,
            late_messages: late,
        })
    } else {
        None
    }
}

/// Counts "let's grab coffee" style overtures in the subject's sent messages,
/// then checks which of those recipients ever got scheduling language in any
/// message from the subject.
pub fn detect_coffee_liar(messages: &[&MessageRow]) -> Option<CoffeeLiar> {
    let mut mentions = 0usize;
    let mut recipients: BTreeSet<&str> = BTreeSet::new();

    for m in messages {
        let content = m.content.to_lowercase();
        if COFFEE_PHRASES.iter().any(|p| content.contains(p)) {
            mentions += 1;
            recipients.insert(m.to.as_str());
        }
    }

    let follow_ups = recipients
        .iter()
        .filter(|recipient| {
            messages.iter().any(|m| {
                m.to == **recipient
                    && SCHEDULING_PHRASES
                        .iter()
                        .any(|p| m.content.to_lowercase().contains(p))
            })
        })
        .count();

    if mentions >= COFFEE_LIAR_MIN_MENTIONS {
        Some(CoffeeLiar { mentions, follow_ups })
    } else {
        None
    }
}

pub fn detect_congrats_bot(reactions: &[&ReactionRow]) -> Option<CongratsBot> {
    let count = reactions
        .iter()
        .filter(|r| r.reaction_type.eq_ignore_ascii_case("celebrate"))
        .count();
    if count >= CONGRATS_BOT_MIN {
        Some(CongratsBot { count })
    } else {
        None
    }
}

static RE_LEGAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",?\s*\b(inc|llc|ltd|corp)\.?$").unwrap());

/// Canonical display form of a company name: lowercase, trailing legal-entity
/// suffix stripped, whitespace collapsed, then title-cased word by word.
/// Distinct spellings of the same employer ("Google Inc", "GOOGLE") land on
/// the same form.
pub fn normalize_company_name(raw: &str) -> Option<String> {
    let lower = raw.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }
    let stripped = RE_LEGAL_SUFFIX.replace(&lower, "");
    let display = stripped
        .split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .join(" ");
    if display.is_empty() {
        None
    } else {
        Some(display)
    }
}

pub fn detect_company_stalker(connections: &[&ConnectionRow]) -> Option<CompanyStalker> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for c in connections {
        if let Some(company) = normalize_company_name(&c.company) {
            *counts.entry(company).or_insert(0) += 1;
        }
    }
    let (company, count) = counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))?;
    if count >= COMPANY_STALKER_MIN {
        Some(CompanyStalker { company, count })
    } else {
        None
    }
}

/// Buckets connection dates by year-month and flags a month whose count is at
/// least 3x the mean across populated months. Ratio is reported to one
/// decimal, the mean to the nearest integer.
pub fn detect_panic_networker(connections: &[&ConnectionRow]) -> Option<PanicNetworker> {
    let mut buckets: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for c in connections {
        if let Some(d) = parse_date(&c.connected_on) {
            use chrono::Datelike;
            *buckets.entry((d.year(), d.month())).or_insert(0) += 1;
        }
    }
    if buckets.is_empty() {
        return None;
    }
    let average = buckets.values().sum::<usize>() as f64 / buckets.len() as f64;
    let ((year, month), count) = buckets
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(k, v)| (*k, *v))?;
    let ratio = count as f64 / average;
    if ratio >= PANIC_RATIO_MIN {
        let label = NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(format_month)
            .unwrap_or_default();
        Some(PanicNetworker {
            month: label,
            count,
            average: average.round() as usize,
            ratio: (ratio * 10.0).round() / 10.0,
        })
    } else {
        None
    }
}

/// Counterparts the subject exchanged at least five messages with whose last
/// contact is more than six months old. Top three by message count.
pub fn detect_ghosts(
    messages: &[&MessageRow],
    user_name: &str,
    today: NaiveDate,
) -> Option<Vec<GhostEntry>> {
    let cutoff = today.checked_sub_months(Months::new(6))?;

    let mut relationships: HashMap<&str, (usize, NaiveDateTime)> = HashMap::new();
    for m in messages {
        let other = if m.from == user_name { m.to.as_str() } else { m.from.as_str() };
        if other.is_empty() {
            continue;
        }
        if let Some(date) = parse_date(&m.date) {
            relationships
                .entry(other)
                .and_modify(|(count, last)| {
                    *count += 1;
                    if date > *last {
                        *last = date;
                    }
                })
                .or_insert((1, date));
        }
    }

    let ghosts: Vec<GhostEntry> = relationships
        .into_iter()
        .filter(|(_, (count, last))| *count >= GHOST_MIN_MESSAGES && last.date() < cutoff)
        .map(|(name, (count, last))| GhostEntry {
            name: name.to_string(),
            last_contact: last,
            message_count: count,
        })
        .sorted_by(|a, b| {
            b.message_count
                .cmp(&a.message_count)
                .then_with(|| a.name.cmp(&b.name))
        })
        .take(GHOST_TOP_N)
        .collect();

    if ghosts.is_empty() {
        None
    } else {
        Some(ghosts)
    }
}

/// Sums buzzword occurrences across shared-post commentary (one hit per word
/// per post) and reports the most frequent word. Ties break toward the
/// earlier entry in the buzzword list.
pub fn detect_thought_leader(shares: &[&ShareRow]) -> Option<ThoughtLeader> {
    let mut counts = [0usize; BUZZWORDS.len()];
    for s in shares {
        let content = s.commentary.to_lowercase();
        for (idx, word) in BUZZWORDS.iter().enumerate() {
            if content.contains(word) {
                counts[idx] += 1;
            }
        }
    }
    let total: usize = counts.iter().sum();
    let top = (0..BUZZWORDS.len()).max_by_key(|&i| (counts[i], BUZZWORDS.len() - i))?;
    if total >= THOUGHT_LEADER_MIN && counts[top] > 0 {
        Some(ThoughtLeader {
            buzzword_count: total,
            top_buzzword: BUZZWORDS[top].to_string(),
        })
    } else {
        None
    }
}
