use content_scorer::lexicon::{self, Lexicon, MatchMode, Theme};
use content_scorer::{analyze, density, style, theme, Analyzer, AnalyzerConfig, ViralPotential};

#[test]
fn combat_scenario_counts_metaphors() {
    let text = "The battle was won. He stood firm. Victory is ours.";
    let result = analyze(text);
    assert_eq!(result.word_count, 10);
    assert_eq!(result.sentence_count, 3);
    assert!(
        result.voice.measured.metaphor_hits >= 2,
        "Expected at least 2 metaphor hits, got {}",
        result.voice.measured.metaphor_hits
    );
    assert!((result.voice.measured.metaphor_density - 20.0).abs() < 1e-9);
}

#[test]
fn empty_input_is_degenerate_not_an_error() {
    let result = analyze("");
    assert_eq!(result.word_count, 0);
    assert_eq!(result.voice.score, 0.0);
    assert!(result
        .densities
        .iter()
        .all(|d| d.aggregate_density == 0.0 && d.categories.iter().all(|c| c.density == 0.0)));
    assert!(result.themes.primary.is_empty());
    assert_eq!(result.summary.suggestions[0], content_scorer::INSUFFICIENT_CONTENT);
    assert_eq!(result.signals.viral_potential, ViralPotential::Low);
}

#[test]
fn empty_classify_suggests_every_category() {
    let report = theme::classify("", lexicon::themes());
    assert!(report.scores.iter().all(|s| s.score == 0.0));
    assert!(report.primary.is_empty());
    for category in lexicon::themes().categories() {
        assert!(
            report
                .suggestions
                .iter()
                .any(|s| s.contains(category.label())),
            "No suggestion for {}",
            category.label()
        );
    }
}

#[test]
fn single_word_never_divides_by_zero() {
    let lex = Lexicon::new("grace", MatchMode::Loose, [("grace", vec!["grace"])]).unwrap();
    assert_eq!(density::score("Grace.", &lex).density_of("grace"), 100.0);
    assert_eq!(density::score("Hope.", &lex).density_of("grace"), 0.0);

    let result = analyze("Grace.");
    assert_eq!(result.word_count, 1);
    assert!((0.0..=1.0).contains(&result.voice.score));
}

#[test]
fn densities_are_never_negative() {
    let texts = [
        "",
        "...",
        "Broken and lost, he fought the battle alone.",
        "Click here to join and unlock the secret blueprint today!",
    ];
    for text in texts {
        let result = analyze(text);
        for table in &result.densities {
            assert!(table.aggregate_density >= 0.0, "{text}: {}", table.lexicon);
            assert!(table.categories.iter().all(|c| c.density >= 0.0));
        }
    }
}

#[test]
fn theme_scores_are_capped() {
    let text = "victory victory victory triumph triumph conquer";
    let report = theme::classify(text, lexicon::themes());
    assert!(report.scores.iter().all(|s| s.score <= 1.0));
    assert_eq!(report.score_of(Theme::Victory.label()), 1.0);
}

#[test]
fn analysis_is_idempotent() {
    let text = "Your father was absent. The church burned you out. \
                But grace is a second chance. Stand firm, warrior.";
    assert_eq!(analyze(text), analyze(text));
}

#[test]
fn exact_target_profile_scores_at_least_two_thirds() {
    let short = "One two three four five six seven.";
    let long = "One two three four five six seven eight nine ten eleven.";
    let mut parts: Vec<&str> = vec![short; 31];
    parts.extend(vec![long; 18]);
    parts.push("One two three four five six seven eight nine ten.");
    let text = parts.join(" ");

    let report = style::match_style(&text, &style::StyleProfile::default()).unwrap();
    assert!((report.components.words - 1.0).abs() < 1e-9);
    assert!((report.components.ratio - 1.0).abs() < 1e-9);
    assert!(report.score >= 2.0 / 3.0 - 1e-9);
}

#[test]
fn emotional_trigger_text_rates_high() {
    let text = "I felt broken and lost. My father was absent and never there. \
                Shame and fear kept me stuck. The church felt fake. \
                Then grace and mercy gave me a second chance.";
    let result = analyze(text);
    assert_eq!(result.signals.viral_potential, ViralPotential::High);

    let triggers = result.density(lexicon::TRIGGERS).unwrap();
    let found: Vec<&str> = triggers.found().map(|c| c.label.as_str()).collect();
    assert!(found.contains(&"father_wound"));
    assert!(found.contains(&"church_hurt"));
    assert!(found.contains(&"grace"));
}

#[test]
fn many_trigger_terms_in_long_text_rate_high() {
    let mut text = vec!["filler"; 195].join(" ");
    text.push_str(" father divorce porn pastor forgiven.");
    let result = analyze(&text);
    assert_eq!(result.word_count, 200);
    assert_eq!(result.signals.viral_potential, ViralPotential::High);

    let triggers = result.density(lexicon::TRIGGERS).unwrap();
    assert_eq!(
        triggers.matched_terms(),
        vec!["father", "divorce", "porn", "pastor", "forgiven"]
    );
}

#[test]
fn pipeline_validation_flags_weak_content() {
    let text = "The quarterly report covers revenue figures across several regional offices \
                and summarizes the operational adjustments made during the previous period.";
    let result = analyze(text);
    let validation = Analyzer::default().validate(&result);
    assert!(!validation.passed);
    assert!(validation
        .issues
        .iter()
        .any(|i| i.contains("at least 2 core themes")));
}

#[test]
fn pipeline_validation_passes_strong_content() {
    let text = "Stand firm. Fight the battle. Resist the enemy. \
                You are chosen. You are royal. You belong. \
                Victory is yours. Overcome. Prevail. Triumph.";
    let result = analyze(text);
    let validation = result.validate(0.0, 2);
    assert!(validation.passed, "issues: {:?}", validation.issues);
}

#[test]
fn config_file_shape_loads() {
    let json = r#"{
        "max_input_chars": 2000,
        "match_mode": "whole_word",
        "theme_threshold": 0.25,
        "style": {"avg_words_per_sentence": 10.0, "short_sentence_ratio": 0.5},
        "lexicons": [
            {"name": "combat_metaphors", "categories": [
                {"label": "combat_metaphors", "terms": ["war", "battle"]}
            ]}
        ]
    }"#;
    let config = AnalyzerConfig::from_json(json).unwrap();
    let analyzer = Analyzer::new(config).unwrap();
    let result = analyzer.analyze("An award-winning battle.");
    assert_eq!(result.voice.measured.metaphor_hits, 1);
}

#[test]
fn json_output_is_valid() {
    let text = "Broken, lost and alone. Shame and fear. Grace wins the battle!";
    let result = analyze(text);
    let json = serde_json::to_string_pretty(&result).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(parsed.get("word_count").is_some());
    assert!(parsed.get("densities").is_some());
    assert!(parsed.get("voice").is_some());
    assert!(parsed.get("themes").is_some());
    assert!(parsed.get("signals").is_some());
    assert!(parsed.get("summary").is_some());
    assert_eq!(parsed["signals"]["viral_potential"], "HIGH");
    assert_eq!(parsed["signals"]["angles"][0], "Generic spiritual content");
    assert!(parsed["densities"][0]["categories"][0]["matched_terms"].is_array());
}

#[test]
fn scoring_runs_concurrently() {
    let analyzer = std::sync::Arc::new(Analyzer::default());
    let text = "Stand firm in the battle. Grace wins.";
    let expected = analyzer.analyze(text);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let analyzer = analyzer.clone();
            std::thread::spawn(move || analyzer.analyze(text))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
