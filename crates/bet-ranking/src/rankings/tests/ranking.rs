use super::common::*;
use crate::rankings::domain::{Bet, BetId};
use crate::rankings::ranking::Ranking;
use crate::rankings::scoring::OverallVariant;

fn twenty_bets() -> Ranking {
    Ranking::from_scores(
        (1..=20).map(|n| (BetId(format!("bet-{n:02}")), format!("Bet {n}"), (100 - n * 3) as u8)),
    )
}

fn positions(entries: &[crate::rankings::ranking::RankedEntry]) -> Vec<usize> {
    entries.iter().map(|entry| entry.position).collect()
}

#[test]
fn orders_by_descending_score_with_positions() {
    let ranking = Ranking::overall(&catalog(), OverallVariant::WeightedCategories, &scoring_config());

    let ids: Vec<&str> = ranking.entries().iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, vec!["b1", "b2", "b3", "b4"]);
    let scores: Vec<u8> = ranking.entries().iter().map(|entry| entry.score).collect();
    assert_eq!(scores, vec![97, 70, 60, 20]);
    assert_eq!(positions(ranking.entries()), vec![1, 2, 3, 4]);
}

#[test]
fn flat_variant_orders_differently() {
    let bets = vec![
        curated_bet("curated", &[(PAGAMENTOS, 50)])
            .with_parameter(boolean("pix", PAGAMENTOS, false))
            .with_parameter(boolean("ted", PAGAMENTOS, false))
            .with_parameter(number("saque", PAGAMENTOS, 5.0)),
        Bet::new("raw", "Raw")
            .with_parameter(boolean("pix", PAGAMENTOS, true))
            .with_parameter(number("saque", PAGAMENTOS, 50.0)),
    ];
    let config = scoring_config();

    let flat = Ranking::overall(&bets, OverallVariant::FlatAverage, &config);
    let weighted = Ranking::overall(&bets, OverallVariant::WeightedCategories, &config);

    // (100 + 30 + 30 + 10) / 4 = 42.5
    assert_eq!(flat.entry(&BetId::new("curated")).map(|entry| entry.score), Some(43));
    assert_eq!(flat.position_of(&BetId::new("raw")), Some(1));
    assert_eq!(weighted.position_of(&BetId::new("curated")), Some(1));
    assert_eq!(weighted.entry(&BetId::new("raw")).map(|entry| entry.score), Some(0));
}

#[test]
fn ties_break_on_ascending_id() {
    let ranking = Ranking::from_scores(vec![
        (BetId::new("zeta"), "Zeta".to_string(), 80),
        (BetId::new("alpha"), "Alpha".to_string(), 80),
        (BetId::new("mid"), "Mid".to_string(), 90),
    ]);
    let ids: Vec<&str> = ranking.entries().iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, vec!["mid", "alpha", "zeta"]);
}

#[test]
fn top_is_clamped_to_available_entries() {
    let ranking = twenty_bets();
    assert_eq!(positions(ranking.top(3)), vec![1, 2, 3]);
    assert_eq!(ranking.top(50).len(), 20);
    assert!(ranking.top(0).is_empty());
}

#[test]
fn oversized_window_is_clamped_to_the_ranking() {
    let ranking = twenty_bets();
    let window = ranking.window(&BetId::new("bet-15"), usize::MAX);

    assert_eq!(window.position, Some(15));
    assert_eq!(positions(&window.above), (1..=14).collect::<Vec<_>>());
    assert_eq!(positions(&window.below), vec![16, 17, 18, 19, 20]);
    assert_eq!(ranking.below(&BetId::new("bet-20"), usize::MAX).len(), 0);
}

#[test]
fn windows_around_reference_keep_true_positions() {
    let ranking = twenty_bets();
    let reference = BetId::new("bet-15");

    assert_eq!(ranking.position_of(&reference), Some(15));
    assert_eq!(positions(ranking.above(&reference, 10)), (5..=14).collect::<Vec<_>>());
    assert_eq!(positions(ranking.below(&reference, 3)), vec![16, 17, 18]);
}

#[test]
fn windows_stop_at_the_edges() {
    let ranking = twenty_bets();

    let first = BetId::new("bet-01");
    assert!(ranking.above(&first, 5).is_empty());
    assert_eq!(positions(ranking.below(&first, 2)), vec![2, 3]);

    let third = BetId::new("bet-03");
    assert_eq!(positions(ranking.above(&third, 10)), vec![1, 2]);

    let last = BetId::new("bet-20");
    assert!(ranking.below(&last, 5).is_empty());
    assert_eq!(positions(ranking.below(&BetId::new("bet-18"), 10)), vec![19, 20]);
}

#[test]
fn absent_reference_has_no_position_or_window() {
    let ranking = twenty_bets();
    let missing = BetId::new("not-linked");

    let window = ranking.window(&missing, 10);
    assert_eq!(window.position, None);
    assert!(window.above.is_empty());
    assert!(window.below.is_empty());
}

#[test]
fn category_ranking_uses_fixed_tier_scores() {
    let ranking = Ranking::by_category(&catalog(), PAGAMENTOS);
    let rows: Vec<(&str, u8)> = ranking
        .entries()
        .iter()
        .map(|entry| (entry.id.as_str(), entry.score))
        .collect();
    assert_eq!(rows, vec![("b1", 100), ("b2", 100), ("b4", 40), ("b3", 30)]);
}

#[test]
fn empty_universe_ranks_nothing() {
    let ranking = Ranking::overall(&[], OverallVariant::FlatAverage, &scoring_config());
    assert!(ranking.is_empty());
    assert!(ranking.top(10).is_empty());
    assert_eq!(ranking.window(&BetId::new("b1"), 3).position, None);
}
