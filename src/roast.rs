use chrono::{Datelike, Local, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::detectors::{analyze_patterns, DetectedPatterns};
use crate::headline::{generate_headline, HeadlineFlags};
use crate::rows::SocialExport;
use crate::scoring::{calculate_archetype, calculate_percentiles, Archetype, PercentileStats};
use crate::slides::{select_slides, SlideData};

/// Explicit clock for one analysis run. Detectors never read system time
/// themselves; this is the only place it enters the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoastOpts {
    /// Calendar year every category is filtered to.
    pub target_year: i32,
    /// Anchor for the ghost six-month staleness cutoff.
    pub today: NaiveDate,
}

impl RoastOpts {
    pub fn new(target_year: i32, today: NaiveDate) -> Self {
        Self { target_year, today }
    }

    pub fn from_system_time() -> Self {
        let today = Local::now().date_naive();
        Self { target_year: today.year(), today }
    }
}

/// The externally visible output of one analysis run, ready to serialize for
/// a presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoastResult {
    pub slides: Vec<SlideData>,
    pub archetype: Archetype,
    pub percentiles: PercentileStats,
    pub headline: String,
    pub user_name: String,
    pub patterns: DetectedPatterns,
}

/// Full pipeline: detect patterns, select slides, score, compose the
/// headline. Pure apart from the injected `rng`, which only picks cosmetic
/// tone/phrase variants.
pub fn generate_roast<R: Rng + ?Sized>(
    data: &SocialExport,
    opts: &RoastOpts,
    rng: &mut R,
) -> RoastResult {
    let patterns = analyze_patterns(data, opts.target_year, opts.today);

    let slides = select_slides(&patterns, rng);
    let archetype = calculate_archetype(&patterns);
    let percentiles = calculate_percentiles(&patterns);

    let flags = HeadlineFlags::from_patterns(&patterns);
    let headline = generate_headline(&data.user_name, archetype.name, &flags, rng);

    RoastResult {
        slides,
        archetype,
        percentiles,
        headline,
        user_name: data.user_name.clone(),
        patterns,
    }
}
