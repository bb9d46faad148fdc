use rand::Rng;

use crate::detectors::DetectedPatterns;
use crate::scoring::ArchetypeName;

const LURKER_HEADLINES: [&str; 5] = [
    "Professionally Invisible",
    "Watching Your Career From a Safe Distance",
    "Silent Observer of Success",
    "Present But Not Posting",
    "Engagement: Minimal | Judgment: Maximum",
];

const BROADCASTER_HEADLINES: [&str; 5] = [
    "Speaking Into the Void",
    "Thought Leader (Self-Assessed)",
    "Content Creator (Limited Audience)",
    "Posting Daily | Engagement Pending",
    "Will Share This Too",
];

const WHISPERER_HEADLINES: [&str; 5] = [
    "Never Posts, Always DMs",
    "Operating in the Background",
    "Inbox Regular, Feed Ghost",
    "Networking in the Shadows",
    "Professionally Mysterious",
];

const OPERATOR_HEADLINES: [&str; 5] = [
    "Optimized the Feed Like a Video Game",
    "Everywhere at Once",
    "Maximum Efficiency, Minimum Chill",
    "Posting AND Engaging | Exhausting",
    "The Algorithm Fears This One",
];

const NIGHT_OWL_MODIFIERS: [&str; 4] = [
    "Online at 11pm for Professional Reasons",
    "Sends Connection Requests After Midnight",
    "Networking Hours: 10pm - 2am",
    "Networking When Normal People Sleep",
];

const COFFEE_LIAR_MODIFIERS: [&str; 4] = [
    "Open to Coffee (Lying)",
    "Would Love to Catch Up (Won't)",
    "Let's Grab Coffee Sometime (Never)",
    "Calendar Availability: Theoretical",
];

const CONGRATS_BOT_MODIFIERS: [&str; 4] = [
    "Has Celebrated 47 Strangers",
    "Professional Congratulator",
    "Will Celebrate Your Thing Too",
    "Clicks Celebrate Reflexively",
];

const COMPANY_STALKER_MODIFIERS: [&str; 4] = [
    "Knows Your Org Chart",
    "Connected to Everyone at [Company]",
    "Industry Researcher (Obsessive)",
    "Following Your Company's Every Move",
];

const NAME_COLLECTION_MODIFIERS: [&str; 3] = [
    "Collecting [Names] for Unknown Reasons",
    "Knows Too Many [Names]",
    "Building a [Name] Portfolio",
];

const DEFAULT_MODIFIERS: [&str; 4] = [
    "Professional Professional",
    "Doing It Professionally",
    "Networked and Networking",
    "Connections: Many | Friends: Fewer",
];

/// The subset of detections the headline composer cares about, in priority
/// order. Built from a [`DetectedPatterns`] via [`HeadlineFlags::from_patterns`].
#[derive(Debug, Clone, Default)]
pub struct HeadlineFlags {
    pub night_owl: bool,
    pub coffee_liar: bool,
    pub congrats_bot: bool,
    pub company_stalker: Option<String>,
    pub name_collection: Option<String>,
}

impl HeadlineFlags {
    pub fn from_patterns(patterns: &DetectedPatterns) -> Self {
        Self {
            night_owl: patterns.night_owl.is_some(),
            coffee_liar: patterns.coffee_liar.is_some(),
            congrats_bot: patterns.congrats_bot.is_some(),
            company_stalker: patterns.company_stalker.as_ref().map(|c| c.company.clone()),
            name_collection: patterns.name_collection.as_ref().map(|n| n.name.clone()),
        }
    }
}

fn pick<'a, R: Rng + ?Sized>(options: &[&'a str], rng: &mut R) -> &'a str {
    options[rng.random_range(0..options.len())]
}

/// Composes `"<name> | <archetype phrase> | <modifier phrase>"`. The archetype
/// phrase is a uniform pick from that archetype's table; the modifier comes
/// from the highest-priority detected pattern (night owl first, generic
/// default last), with company/name placeholders substituted in.
pub fn generate_headline<R: Rng + ?Sized>(
    user_name: &str,
    archetype: ArchetypeName,
    flags: &HeadlineFlags,
    rng: &mut R,
) -> String {
    let archetype_part = pick(
        match archetype {
            ArchetypeName::Lurker => &LURKER_HEADLINES,
            ArchetypeName::Broadcaster => &BROADCASTER_HEADLINES,
            ArchetypeName::Whisperer => &WHISPERER_HEADLINES,
            ArchetypeName::Operator => &OPERATOR_HEADLINES,
        },
        rng,
    );

    let modifier_options: &[&str] = if flags.night_owl {
        &NIGHT_OWL_MODIFIERS
    } else if flags.coffee_liar {
        &COFFEE_LIAR_MODIFIERS
    } else if flags.congrats_bot {
        &CONGRATS_BOT_MODIFIERS
    } else if flags.company_stalker.is_some() {
        &COMPANY_STALKER_MODIFIERS
    } else if flags.name_collection.is_some() {
        &NAME_COLLECTION_MODIFIERS
    } else {
        &DEFAULT_MODIFIERS
    };
    let mut modifier_part = pick(modifier_options, rng).to_string();

    if let Some(company) = &flags.company_stalker {
        modifier_part = modifier_part.replace("[Company]", company);
    }
    if let Some(name) = &flags.name_collection {
        modifier_part = modifier_part.replace("[Names]", &format!("{name}s"));
        modifier_part = modifier_part.replace("[Name]", name);
    }

    format!("{user_name} | {archetype_part} | {modifier_part}")
}
