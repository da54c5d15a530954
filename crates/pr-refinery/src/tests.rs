use crate::*;
use crate::analysis::{self, TextAnalysis};
use crate::{stage1_redundant, stage2_filler, stage3_level, stage4_strategy, stage5_format, stage6_cleanup};

fn cfg(strategy: Strategy, level: Level, format: Format) -> RefineryConfig {
    RefineryConfig::new(strategy, level, format)
}

fn run(text: &str, config: &RefineryConfig) -> RefinementResult {
    refine(text, config).unwrap()
}

fn removed_texts(r: &RefinementResult) -> Vec<&str> {
    r.removed_segments.iter().map(|s| s.text.as_str()).collect()
}

// ========== Stage 1: Redundant phrases ==========

#[test]
fn test_s1_removes_in_order() {
    let mut log = RemovalLog::default();
    let out = stage1_redundant::apply(
        "In order to succeed, first of all read the brief. In my opinion it is concise.",
        &mut log,
    );
    assert!(!out.to_lowercase().contains("in order to"));
    assert!(!out.contains("first of all"));
    let texts: Vec<_> = log.segments().iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["In order to", "first of all", "In my opinion"]);
    assert!(log.segments().iter().all(|s| s.reason == stage1_redundant::REASON));
}

#[test]
fn test_s1_stacked_intensifier() {
    let mut log = RemovalLog::default();
    let out = stage1_redundant::apply("This is very very slow", &mut log);
    assert_eq!(out, "This is  slow");
    assert_eq!(log.segments()[0].text, "very very");
}

#[test]
fn test_s1_word_boundaries() {
    let mut log = RemovalLog::default();
    let out = stage1_redundant::apply("Restart by noon", &mut log);
    assert_eq!(out, "Restart by noon");
    assert!(log.is_empty());
}

// ========== Stage 2: Filler words ==========

#[test]
fn test_s2_fillers() {
    let mut log = RemovalLog::default();
    let out = stage2_filler::apply("I just basically want a summary", &mut log);
    assert_eq!(out, "I   want a summary");
    let texts: Vec<_> = log.segments().iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["just", "basically"]);
    assert!(log.segments().iter().all(|s| s.reason == stage2_filler::REASON));
}

#[test]
fn test_s2_existential_opener() {
    let mut log = RemovalLog::default();
    let out = stage2_filler::apply("There is a bug here", &mut log);
    assert_eq!(out, "a bug here");
}

#[test]
fn test_s2_keeps_substrings_of_words() {
    let mut log = RemovalLog::default();
    let out = stage2_filler::apply("Justify the nowhere clause", &mut log);
    assert_eq!(out, "Justify the nowhere clause");
}

// ========== Stage 3: Level ==========

#[test]
fn test_s3_light_is_passthrough() {
    let mut log = RemovalLog::default();
    assert_eq!(stage3_level::apply("a  b!!", Level::Light, &mut log), "a  b!!");
}

#[test]
fn test_s3_balanced_collapses() {
    let mut log = RemovalLog::default();
    let out = stage3_level::apply("  Stop!!  Wait ?? \n Go home...", Level::Balanced, &mut log);
    assert_eq!(out, "Stop! Wait ? Go home.");
    assert!(log.is_empty());
}

#[test]
fn test_s3_spaced_punctuation_collapses() {
    assert_eq!(stage3_level::collapse_punctuation("Why? ? ?"), "Why?");
}

#[test]
fn test_s3_aggressive_articles() {
    let mut log = RemovalLog::default();
    let out = stage3_level::apply("The cat sat on the mat.", Level::Aggressive, &mut log);
    assert_eq!(out, "cat sat on mat.");
    assert_eq!(log.len(), 2);
    assert!(log.segments().iter().all(|s| s.reason == stage3_level::ARTICLE_REASON));
}

#[test]
fn test_s3_aggressive_contractions() {
    let mut log = RemovalLog::default();
    let out = stage3_level::apply(
        "Call me in the event that it fails because of the fact that logs vanish.",
        Level::Aggressive,
        &mut log,
    );
    assert_eq!(out, "Call me if it fails because logs vanish.");
    assert!(log.is_empty());
}

// ========== Stage 4: Strategy ==========

#[test]
fn test_s4_legal_doublets() {
    let mut log = RemovalLog::default();
    let out = stage4_strategy::apply(
        "Deliver full and complete records and/or copies to each and every party",
        Strategy::Legal,
        &mut log,
    );
    assert_eq!(out, "Deliver full records or copies to each party");
}

#[test]
fn test_s4_legal_keeps_politeness() {
    let mut log = RemovalLog::default();
    let out = stage4_strategy::apply("Please be sure to sign", Strategy::Legal, &mut log);
    assert_eq!(out, "Please be sure to sign");
}

#[test]
fn test_s4_gpt() {
    let mut log = RemovalLog::default();
    let out = stage4_strategy::apply(
        "Could you summarize this and make sure to cite sources, please",
        Strategy::Gpt,
        &mut log,
    );
    assert_eq!(out, "summarize this and ensure cite sources,");
    assert_eq!(log.len(), 2);
    assert!(log.segments().iter().all(|s| s.reason == stage4_strategy::POLITENESS_REASON));
}

#[test]
fn test_s4_claude() {
    let mut log = RemovalLog::default();
    let out = stage4_strategy::apply(
        "List risks and also mitigations in addition to owners",
        Strategy::Claude,
        &mut log,
    );
    assert_eq!(out, "List risks and mitigations plus owners");
}

#[test]
fn test_s4_universal() {
    let mut log = RemovalLog::default();
    let out = stage4_strategy::apply("It was really quite bad, thanks so much", Strategy::Universal, &mut log);
    assert_eq!(out, "It was bad, thanks much");
    assert_eq!(log.len(), 2);
    assert_eq!(log.segments()[0].reason, stage4_strategy::INTENSIFIER_REASON);
}

#[test]
fn test_s4_deepseek_uses_universal_branch() {
    let text = "A very small and really big thing, so many";
    let mut a = RemovalLog::default();
    let mut b = RemovalLog::default();
    assert_eq!(
        stage4_strategy::apply(text, Strategy::DeepSeek, &mut a),
        stage4_strategy::apply(text, Strategy::Universal, &mut b),
    );
}

// ========== Stage 5: Format ==========

#[test]
fn test_s5_xml_passthrough() {
    let mut log = RemovalLog::default();
    assert_eq!(stage5_format::apply("A. B", Format::XmlTagged, Level::Balanced, &mut log), "A. B");
}

#[test]
fn test_s5_structured() {
    let mut log = RemovalLog::default();
    let out = stage5_format::apply("First step. Second step! third? Fourth", Format::Structured, Level::Balanced, &mut log);
    assert_eq!(out, "First step.\nSecond step! third?\nFourth");
}

#[test]
fn test_s5_structured_light_splits_unspaced_sentences() {
    let mut log = RemovalLog::default();
    let text = "Done.Next step!Then stop. Fine";
    assert_eq!(
        stage5_format::apply(text, Format::Structured, Level::Light, &mut log),
        "Done.\nNext step!\nThen stop.\nFine"
    );
    assert_eq!(
        stage5_format::apply(text, Format::Structured, Level::Aggressive, &mut log),
        "Done.Next step!Then stop.\nFine"
    );
}

#[test]
fn test_s5_minimalist() {
    let mut log = RemovalLog::default();
    let out = stage5_format::apply(
        "Kindly send the report to a manager, thank you.",
        Format::Minimalist,
        Level::Balanced,
        &mut log,
    );
    assert_eq!(out, "send report to manager, .");
    let reasons: Vec<_> = log.segments().iter().map(|s| s.reason.as_str()).collect();
    assert_eq!(
        reasons,
        vec![
            stage5_format::PLEASANTRY_REASON,
            stage5_format::PLEASANTRY_REASON,
            stage3_level::ARTICLE_REASON,
            stage3_level::ARTICLE_REASON,
        ]
    );
}

// ========== Stage 6: Cleanup ==========

#[test]
fn test_s6_cleanup() {
    assert_eq!(stage6_cleanup::apply("  hello   world .!  "), "Hello world");
}

#[test]
fn test_s6_keeps_single_line_breaks() {
    assert_eq!(stage6_cleanup::apply("one.\n\n  two"), "One.\ntwo");
}

#[test]
fn test_s6_empty() {
    assert_eq!(stage6_cleanup::apply(""), "");
    assert_eq!(stage6_cleanup::apply(" ?! "), "");
}

#[test]
fn test_s6_idempotent_samples() {
    for s in ["abc . !", "x\t\ny", "ß is first", "done...", "  a ? b ?"] {
        let once = stage6_cleanup::apply(s);
        assert_eq!(stage6_cleanup::apply(&once), once, "{s:?}");
    }
}

// ========== Removal log / preserve keywords ==========

#[test]
fn test_log_preserved_case_insensitive() {
    let log = RemovalLog::new(&["API"]);
    assert!(log.is_preserved("the api key"));
    assert!(!log.is_preserved("token"));
}

#[test]
fn test_log_ignores_blank_keywords() {
    let log = RemovalLog::new(&["  ", ""]);
    assert!(!log.is_preserved("anything"));
}

#[test]
fn test_preserved_match_not_removed() {
    let config = RefineryConfig::default().with_preserve_keywords(["basically"]);
    let r = run("Basically just ship it today", &config);
    assert!(r.refined_text.starts_with("Basically"));
    assert_eq!(removed_texts(&r), vec!["just"]);
}

#[test]
fn test_preserved_segment_protected_from_later_stages() {
    let config = RefineryConfig::default().with_preserve_keywords(["important"]);
    let r = run("It is important to note that the budget is final.", &config);
    assert_eq!(r.refined_text, "It is important to note that the budget is final");
    assert!(r.removed_segments.is_empty());
}

#[test]
fn test_unpreserved_meta_commentary_removed() {
    let r = run("It is important to note that the budget is final.", &RefineryConfig::default());
    assert_eq!(r.refined_text, "The budget is final");
    assert_eq!(removed_texts(&r), vec!["It is important to note that"]);
}

#[test]
fn test_leading_preserved_segment_is_capitalized() {
    let config = RefineryConfig::default().with_preserve_keywords(["opinion"]);
    let r = run("in my opinion the plan works", &config);
    assert_eq!(r.refined_text, "In my opinion the plan works");
    assert!(r.removed_segments.is_empty());
}

#[test]
fn test_preserved_article_survives_aggressive() {
    let config = cfg(Strategy::Universal, Level::Aggressive, Format::XmlTagged)
        .with_preserve_keywords(["the"]);
    let r = run("The cat sat on the mat.", &config);
    assert_eq!(r.refined_text, "The cat sat on the mat");
}

// ========== Pipeline ==========

#[test]
fn test_legal_strategy_isolation() {
    let config = cfg(Strategy::Legal, Level::Balanced, Format::XmlTagged);
    let r = run(
        "Please ensure you kindly review the contract and/or each and every clause.",
        &config,
    );
    assert_eq!(r.refined_text, "Please ensure you kindly review the contract or each clause");
    assert!(r.removed_segments.is_empty());
}

#[test]
fn test_gpt_strips_please() {
    let config = cfg(Strategy::Gpt, Level::Balanced, Format::XmlTagged);
    let r = run(
        "Please ensure you kindly review the contract and/or each and every clause.",
        &config,
    );
    assert_eq!(r.refined_text, "Ensure you kindly review the contract and/or each and every clause");
    assert_eq!(removed_texts(&r), vec!["Please"]);
}

#[test]
fn test_aggressive_determiners() {
    let config = cfg(Strategy::Universal, Level::Aggressive, Format::XmlTagged);
    let r = run("The cat sat on the mat.", &config);
    assert_eq!(r.refined_text, "Cat sat on mat");
    assert_eq!(removed_texts(&r), vec!["The", "the"]);
}

#[test]
fn test_structured_survives_cleanup() {
    let config = cfg(Strategy::Universal, Level::Balanced, Format::Structured);
    let r = run("First step. Second step! Third step?", &config);
    assert_eq!(r.refined_text, "First step.\nSecond step!\nThird step");
}

#[test]
fn test_structured_light_splits_run_on_sentences() {
    let light = cfg(Strategy::Universal, Level::Light, Format::Structured);
    assert_eq!(run("Done.Next step.", &light).refined_text, "Done.\nNext step");
    let balanced = cfg(Strategy::Universal, Level::Balanced, Format::Structured);
    assert_eq!(run("Done.Next step.", &balanced).refined_text, "Done.Next step");
}

#[test]
fn test_light_keeps_line_breaks() {
    let config = cfg(Strategy::Universal, Level::Light, Format::XmlTagged);
    let r = run("Line one\n\nLine two", &config);
    assert_eq!(r.refined_text, "Line one\nLine two");
}

#[test]
fn test_empty_input() {
    let r = run("", &RefineryConfig::default());
    assert_eq!(r.refined_text, "");
    assert!(r.removed_segments.is_empty());
    assert_eq!(r.estimated_original_tokens, 0);
    assert_eq!(r.savings_percentage, 0.0);
    assert_eq!(r.iterations, 1);
}

#[test]
fn test_result_records_config_and_tokens() {
    let config = cfg(Strategy::Claude, Level::Light, Format::Minimalist);
    let text = "Please just review the attached draft and also the appendix.";
    let r = run(text, &config);
    assert_eq!(r.original_text, text);
    assert_eq!(r.strategy, Strategy::Claude);
    assert_eq!(r.level, Level::Light);
    assert_eq!(r.format, Format::Minimalist);
    assert_eq!(r.estimated_original_tokens, text.len().div_ceil(4));
    assert_eq!(r.estimated_refined_tokens, r.refined_text.len().div_ceil(4));
    assert!(r.savings_percentage > 0.0);
    assert_eq!(r.tokens_saved(), r.estimated_original_tokens - r.estimated_refined_tokens);
}

struct WordCounter;

impl pr_core::TokenCounter for WordCounter {
    fn name(&self) -> &str {
        "words"
    }

    fn count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

#[test]
fn test_custom_counter() {
    let pipeline = RefineryPipeline::default().with_counter(WordCounter);
    assert_eq!(pipeline.counter().name(), "words");
    let r = pipeline.refine("I just basically want a summary");
    assert_eq!(r.estimated_original_tokens, 6);
    assert_eq!(r.estimated_refined_tokens, 4);
    assert!((r.savings_percentage - 100.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_invalid_config_fails_fast() {
    let config = RefineryConfig::default().with_max_iterations(0);
    assert!(matches!(refine("text", &config), Err(RefineryError::Config(_))));
    assert!(RefineryPipeline::new(config).is_err());
}

// ========== Iterations ==========

#[test]
fn test_single_pass_by_default() {
    let r = run("Read first in my opinion of all the notes", &RefineryConfig::default());
    assert_eq!(r.refined_text, "Read first of all the notes");
    assert_eq!(r.iterations, 1);
}

#[test]
fn test_iterates_to_fixed_point() {
    let config = RefineryConfig::default().with_max_iterations(5);
    let r = run("Read first in my opinion of all the notes", &config);
    assert_eq!(r.refined_text, "Read the notes");
    assert_eq!(r.iterations, 3);
    assert_eq!(removed_texts(&r), vec!["in my opinion", "first of all"]);
}

#[test]
fn test_iteration_stops_when_unchanged() {
    let config = RefineryConfig::default().with_max_iterations(10);
    let r = run("Review the draft", &config);
    assert_eq!(r.iterations, 1);
}

// ========== Analysis / scores ==========

fn analysis_with(complexity: f64) -> TextAnalysis {
    TextAnalysis {
        total_words: 0,
        total_sentences: 0,
        total_paragraphs: 0,
        avg_words_per_sentence: 0.0,
        complexity,
    }
}

#[test]
fn test_integrity_by_level() {
    let a = analysis_with(20.0);
    assert_eq!(analysis::compute_scores(&a, &a, 0.0, Level::Light).integrity, 85.0);
    assert_eq!(analysis::compute_scores(&a, &a, 0.0, Level::Balanced).integrity, 80.0);
    assert_eq!(analysis::compute_scores(&a, &a, 0.0, Level::Aggressive).integrity, 70.0);
}

#[test]
fn test_integrity_complexity_drop() {
    let scores = analysis::compute_scores(&analysis_with(30.0), &analysis_with(15.0), 0.0, Level::Balanced);
    assert_eq!(scores.integrity, 75.0);
    let scores = analysis::compute_scores(&analysis_with(30.0), &analysis_with(20.0), 0.0, Level::Balanced);
    assert_eq!(scores.integrity, 80.0);
}

#[test]
fn test_efficiency_clamped() {
    let a = analysis_with(0.0);
    assert_eq!(analysis::compute_scores(&a, &a, 20.0, Level::Balanced).efficiency, 40.0);
    assert_eq!(analysis::compute_scores(&a, &a, 75.0, Level::Balanced).efficiency, 100.0);
}

#[test]
fn test_complexity_bands() {
    assert_eq!(analysis::complexity_score(""), 0.0);
    // unique vocabulary only
    assert_eq!(analysis::complexity_score("The cat sat on the mat."), 10.0);
    let long_sentence = (0..30).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
    assert_eq!(analysis::complexity_score(&long_sentence), 25.0);
    let repetitive = "go ".repeat(700);
    assert_eq!(analysis::complexity_score(&repetitive), 20.0 + 15.0);
}

#[test]
fn test_analyze_counts() {
    let a = analysis::analyze("One two. Three four five!\n\nSix.");
    assert_eq!(a.total_words, 6);
    assert_eq!(a.total_sentences, 3);
    assert_eq!(a.total_paragraphs, 2);
    assert_eq!(a.avg_words_per_sentence, 2.0);
}

#[test]
fn test_pipeline_scores() {
    let config = cfg(Strategy::Universal, Level::Aggressive, Format::XmlTagged);
    let r = run("The cat sat on the mat.", &config);
    assert_eq!(r.scores.integrity, 70.0);
    assert!((r.scores.efficiency - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(r.scores.complexity, 10.0);
}

#[test]
fn test_explanation() {
    let config = cfg(Strategy::Legal, Level::Balanced, Format::XmlTagged);
    let text = analysis::explanation(&config, 12.345, 3, 1, 4);
    assert!(text.contains("completed in 4ms (1 pass)"));
    assert!(text.contains("Strategy: Legal / Regulatory, Level: Balanced, Format: XML Tags"));
    assert!(text.contains("Token savings: 12.3%"));
    assert!(text.contains("Removed segments: 3"));
}

// ========== Batch ==========

#[test]
fn test_batch_summary() {
    let pipeline = RefineryPipeline::default();
    let report = refine_batch(
        ["I just basically want a summary of the report.", "   ", "The cat sat on the mat."],
        &pipeline,
    );
    assert_eq!(report.items.len(), 3);
    assert_eq!(report.items[1].status, BatchStatus::Skipped);
    assert!(report.items[1].result.is_none());
    assert_eq!(report.completed().count(), 2);

    let s = &report.summary;
    assert_eq!(s.total_prompts, 3);
    let orig: usize = report.completed().map(|i| i.result.as_ref().unwrap().estimated_original_tokens).sum();
    assert_eq!(s.total_original_tokens, orig);
    assert!(s.total_refined_tokens <= s.total_original_tokens);
    let expected_dollars = s.tokens_saved() as f64 / 1000.0 * batch::DEFAULT_PRICE_PER_1K;
    assert!((s.estimated_dollar_savings - expected_dollars).abs() < 1e-12);
    assert!(report.finished_at >= report.started_at);
}

#[test]
fn test_batch_ids_unique() {
    let report = refine_batch(vec!["a b c d e f".to_string(); 4], &RefineryPipeline::default());
    let mut ids: Vec<_> = report.items.iter().map(|i| i.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}

#[test]
fn test_batch_empty() {
    let report = refine_batch(Vec::<String>::new(), &RefineryPipeline::default());
    assert_eq!(report.summary, BatchSummary::default());
}

#[test]
fn test_batch_priced_and_json() {
    let report = refine_batch_priced(["I just basically want a summary."], &RefineryPipeline::default(), 1.0);
    let s = &report.summary;
    assert!((s.estimated_dollar_savings - s.tokens_saved() as f64 / 1000.0).abs() < 1e-12);
    let json = report.to_json().unwrap();
    assert!(json.contains("\"totalPrompts\": 1"));
    assert!(json.contains("\"status\": \"completed\""));
    assert!(json.contains("\"refinedText\""));
}
