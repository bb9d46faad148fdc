use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dates::format_month;
use crate::detectors::{
    CoffeeLiar, CompanyStalker, CongratsBot, DetectedPatterns, NameCollection, NightOwl,
    PanicNetworker, ReplyGuy, ThoughtLeader,
};

pub const MAX_SLIDES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlideType {
    Opening,
    NameCollection,
    NightOwl,
    CoffeeLiar,
    CongratsBot,
    CompanyStalker,
    PanicNetworker,
    Ghost,
    ReplyGuy,
    ThoughtLeader,
}

/// Cosmetic tone of a slide's copy. Chosen uniformly at random per slide and
/// never feeds back into detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HumorFlavor {
    Absurdist,
    Meta,
    Deadpan,
    Universal,
}

const FLAVORS: [HumorFlavor; 4] = [
    HumorFlavor::Absurdist,
    HumorFlavor::Meta,
    HumorFlavor::Deadpan,
    HumorFlavor::Universal,
];

pub fn random_flavor<R: Rng + ?Sized>(rng: &mut R) -> HumorFlavor {
    FLAVORS[rng.random_range(0..FLAVORS.len())]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningTotals {
    pub total_connections: usize,
    pub total_messages: usize,
    pub total_reactions: usize,
    pub total_posts: usize,
}

/// Ghost entries carry a pre-formatted "Month Year" label for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostSlideEntry {
    pub name: String,
    pub last_contact: String,
    pub message_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostSlide {
    pub ghosts: Vec<GhostSlideEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlidePayload {
    Opening(OpeningTotals),
    NameCollection(NameCollection),
    NightOwl(NightOwl),
    CoffeeLiar(CoffeeLiar),
    CongratsBot(CongratsBot),
    CompanyStalker(CompanyStalker),
    PanicNetworker(PanicNetworker),
    Ghost(GhostSlide),
    ReplyGuy(ReplyGuy),
    ThoughtLeader(ThoughtLeader),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideData {
    #[serde(rename = "type")]
    pub slide_type: SlideType,
    pub flavor: HumorFlavor,
    pub data: SlidePayload,
}

/// Builds the narrative sequence: the opening slide first, then one slide per
/// detected pattern in canonical order, truncated to [`MAX_SLIDES`].
pub fn select_slides<R: Rng + ?Sized>(patterns: &DetectedPatterns, rng: &mut R) -> Vec<SlideData> {
    let mut slides = Vec::new();

    slides.push(SlideData {
        slide_type: SlideType::Opening,
        flavor: random_flavor(rng),
        data: SlidePayload::Opening(OpeningTotals {
            total_connections: patterns.total_connections,
            total_messages: patterns.total_messages,
            total_reactions: patterns.total_reactions,
            total_posts: patterns.total_posts,
        }),
    });

    if let Some(p) = &patterns.company_stalker {
        slides.push(SlideData {
            slide_type: SlideType::CompanyStalker,
            flavor: random_flavor(rng),
            data: SlidePayload::CompanyStalker(p.clone()),
        });
    }

    if let Some(p) = &patterns.panic_networker {
        slides.push(SlideData {
            slide_type: SlideType::PanicNetworker,
            flavor: random_flavor(rng),
            data: SlidePayload::PanicNetworker(p.clone()),
        });
    }

    if let Some(p) = &patterns.name_collection {
        slides.push(SlideData {
            slide_type: SlideType::NameCollection,
            flavor: random_flavor(rng),
            data: SlidePayload::NameCollection(p.clone()),
        });
    }

    if let Some(p) = &patterns.night_owl {
        slides.push(SlideData {
            slide_type: SlideType::NightOwl,
            flavor: random_flavor(rng),
            data: SlidePayload::NightOwl(p.clone()),
        });
    }

    if let Some(p) = &patterns.coffee_liar {
        slides.push(SlideData {
            slide_type: SlideType::CoffeeLiar,
            flavor: random_flavor(rng),
            data: SlidePayload::CoffeeLiar(p.clone()),
        });
    }

    if let Some(p) = &patterns.congrats_bot {
        slides.push(SlideData {
            slide_type: SlideType::CongratsBot,
            flavor: random_flavor(rng),
            data: SlidePayload::CongratsBot(p.clone()),
        });
    }

    if let Some(ghosts) = &patterns.ghost {
        if !ghosts.is_empty() {
            slides.push(SlideData {
                slide_type: SlideType::Ghost,
                flavor: random_flavor(rng),
                data: SlidePayload::Ghost(GhostSlide {
                    ghosts: ghosts
                        .iter()
                        .map(|g| GhostSlideEntry {
                            name: g.name.clone(),
                            last_contact: format_month(g.last_contact),
                            message_count: g.message_count,
                        })
                        .collect(),
                }),
            });
        }
    }

    if let Some(p) = &patterns.thought_leader {
        slides.push(SlideData {
            slide_type: SlideType::ThoughtLeader,
            flavor: random_flavor(rng),
            data: SlidePayload::ThoughtLeader(p.clone()),
        });
    }

    if let Some(p) = &patterns.reply_guy {
        slides.push(SlideData {
            slide_type: SlideType::ReplyGuy,
            flavor: random_flavor(rng),
            data: SlidePayload::ReplyGuy(p.clone()),
        });
    }

    slides.truncate(MAX_SLIDES);
    slides
}
