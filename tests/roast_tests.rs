use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use roastscope::roast::{generate_roast, RoastOpts};
use roastscope::rows::{
    detect_user_name, ConnectionRow, MessageRow, ReactionRow, ShareRow, SocialExport,
};
use roastscope::scoring::ArchetypeName;
use roastscope::slides::SlideType;

const USER: &str = "Roast Subject";

/// The end-to-end fixture: one target year of activity with five patterns
/// planted (name collection, night owl, coffee liar, congrats bot, thought
/// leader) and the rest deliberately kept quiet.
fn fixture() -> SocialExport {
    let mut connections = Vec::new();
    // 5 Gregs with distinct surnames, 45 others, 5 connections per month over
    // 10 months so no panic spike, companies all distinct so no stalking.
    for i in 0..50usize {
        let month = (i / 5) + 1;
        connections.push(ConnectionRow {
            first_name: if i < 5 { "Greg".to_string() } else { format!("Person{i}") },
            last_name: format!("Surname{i}"),
            company: format!("Company {i}"),
            connected_on: format!("2025-{month:02}-10"),
            ..Default::default()
        });
    }

    // 100 subject-sent messages, 4 per recipient so nobody reaches the ghost
    // bar; 25 sent after 10pm; four coffee overtures split between two
    // recipients, one of whom gets a weekday follow-up.
    let mut messages = Vec::new();
    for i in 0..100usize {
        let recipient = format!("Recipient{}", i / 4);
        let hour = if i < 25 { 23 } else { 14 };
        let content = match i {
            0 | 1 => "we should grab coffee sometime".to_string(),
            2 => "are you free on monday?".to_string(),
            8 | 9 => "let's grab coffee".to_string(),
            _ => format!("work thing {i}"),
        };
        messages.push(MessageRow {
            from: USER.to_string(),
            to: recipient,
            date: format!("2025-03-{:02} {hour}:15:00", (i % 28) + 1),
            content,
            ..Default::default()
        });
    }

    // 200 reactions, 35 of them celebrates.
    let reactions: Vec<ReactionRow> = (0..200usize)
        .map(|i| ReactionRow {
            date: "2025-05-01".to_string(),
            reaction_type: if i < 35 { "CELEBRATE".to_string() } else { "like".to_string() },
            ..Default::default()
        })
        .collect();

    // 10 shares carrying 12 buzzword hits, "humbled" most frequent.
    let shares: Vec<ShareRow> = (0..10usize)
        .map(|i| ShareRow {
            date: "2025-06-01".to_string(),
            commentary: match i {
                0..=5 => "humbled to announce".to_string(),
                6..=8 => "excited for this journey".to_string(),
                _ => "a normal post".to_string(),
            },
            ..Default::default()
        })
        .collect();

    SocialExport {
        connections,
        messages,
        reactions,
        shares,
        invitations: Vec::new(),
        user_name: USER.to_string(),
    }
}

fn opts() -> RoastOpts {
    RoastOpts::new(2025, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
}

#[test]
fn end_to_end_detects_the_planted_patterns() {
    let mut rng = StdRng::seed_from_u64(2025);
    let result = generate_roast(&fixture(), &opts(), &mut rng);
    let p = &result.patterns;

    let names = p.name_collection.as_ref().expect("name collection");
    assert_eq!(names.name, "Greg");
    assert_eq!(names.count, 5);

    let owl = p.night_owl.as_ref().expect("night owl");
    assert_eq!(owl.late_messages, 25);
    assert_eq!(owl.percentage, 25);

    let coffee = p.coffee_liar.as_ref().expect("coffee liar");
    assert_eq!(coffee.mentions, 4);
    assert_eq!(coffee.follow_ups, 1);

    assert_eq!(p.congrats_bot.as_ref().expect("congrats bot").count, 35);

    let leader = p.thought_leader.as_ref().expect("thought leader");
    assert_eq!(leader.buzzword_count, 12);
    assert_eq!(leader.top_buzzword, "humbled");

    assert!(p.company_stalker.is_none());
    assert!(p.panic_networker.is_none());
    assert!(p.ghost.is_none());
    assert!(p.reply_guy.is_none(), "no comments table, never detected");

    assert_eq!(p.total_connections, 50);
    assert_eq!(p.total_messages, 100);
    assert_eq!(p.total_reactions, 200);
    assert_eq!(p.total_posts, 10);
}

#[test]
fn end_to_end_scores_and_classifies() {
    let mut rng = StdRng::seed_from_u64(2025);
    let result = generate_roast(&fixture(), &opts(), &mut rng);

    // posting = 10 posts -> 25th, engagement = 100 + 200 -> 50th.
    assert_eq!(result.percentiles.posting, 25);
    assert_eq!(result.percentiles.engagement, 50);
    assert!(!result.percentiles.is_loud);
    assert!(result.percentiles.is_active);
    assert_eq!(result.archetype.name, ArchetypeName::Whisperer);

    assert!(result.headline.starts_with("Roast Subject | "));
    assert_eq!(result.user_name, USER);
}

#[test]
fn end_to_end_slide_sequence_is_canonical() {
    let mut rng = StdRng::seed_from_u64(2025);
    let result = generate_roast(&fixture(), &opts(), &mut rng);
    let types: Vec<SlideType> = result.slides.iter().map(|s| s.slide_type).collect();
    assert_eq!(
        types,
        vec![
            SlideType::Opening,
            SlideType::NameCollection,
            SlideType::NightOwl,
            SlideType::CoffeeLiar,
            SlideType::CongratsBot,
            SlideType::ThoughtLeader,
        ]
    );
    assert!(result.slides.len() <= 8);
}

#[test]
fn rows_outside_the_target_year_are_ignored() {
    let mut data = fixture();
    for c in &mut data.connections {
        c.connected_on = "2024-06-01".to_string();
    }
    let mut rng = StdRng::seed_from_u64(1);
    let result = generate_roast(&data, &opts(), &mut rng);
    assert_eq!(result.patterns.total_connections, 0);
    assert!(result.patterns.name_collection.is_none());
}

#[test]
fn empty_export_still_produces_a_valid_result() {
    let data = SocialExport { user_name: "Nobody".to_string(), ..Default::default() };
    let mut rng = StdRng::seed_from_u64(1);
    let result = generate_roast(&data, &opts(), &mut rng);
    assert_eq!(result.slides.len(), 1);
    assert_eq!(result.slides[0].slide_type, SlideType::Opening);
    assert_eq!(result.archetype.name, ArchetypeName::Lurker);
    assert_eq!(result.patterns.total_messages, 0);
    assert!(!result.headline.is_empty());
}

#[test]
fn result_serializes_to_json() {
    let mut rng = StdRng::seed_from_u64(9);
    let result = generate_roast(&fixture(), &opts(), &mut rng);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["userName"].as_str(), None, "snake_case field names");
    assert_eq!(json["user_name"], USER);
    assert_eq!(json["archetype"]["name"], "THE WHISPERER");
    assert!(json["slides"].as_array().unwrap().len() >= 1);
}

#[test]
fn user_name_detection_picks_most_frequent_sender() {
    let messages = vec![
        MessageRow { from: "Alice".into(), ..Default::default() },
        MessageRow { from: "Alice".into(), ..Default::default() },
        MessageRow { from: "Bob".into(), ..Default::default() },
    ];
    assert_eq!(detect_user_name(&messages), "Alice");
    assert_eq!(detect_user_name(&[]), "User");
}
