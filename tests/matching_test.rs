mod common;

use common::{FailingSearch, ScriptedSearch, candidate};
use radiotracks::matching::{
    ExactMatch, NormalizedMatch, PartialMatch, SearchError, SwappedFields, TrackFinderStrategy,
    default_strategies, find_in_chain,
};

fn ids(found: Option<radiotracks::types::CandidateTrack>) -> Option<String> {
    found.map(|c| c.external_id)
}

#[tokio::test]
async fn test_exact_match_ignores_case() {
    let search = ScriptedSearch::new(vec![
        candidate("sos", "ABBA", "SOS"),
        candidate("waterloo", "ABBA", "Waterloo"),
    ]);

    let found = ExactMatch.find("abba", "WATERLOO", &search).await.unwrap();

    assert_eq!(ids(found), Some("waterloo".to_string()));
    assert_eq!(search.queries(), vec![("abba".to_string(), "WATERLOO".to_string())]);
}

#[tokio::test]
async fn test_exact_match_accepts_one_of_several_artists() {
    let search = ScriptedSearch::new(vec![candidate(
        "lucky",
        "Daft Punk, Pharrell Williams, Nile Rodgers",
        "Get Lucky",
    )]);

    let found = ExactMatch.find("Pharrell Williams", "Get Lucky", &search).await.unwrap();

    assert_eq!(ids(found), Some("lucky".to_string()));
}

#[tokio::test]
async fn test_exact_match_rejects_spelling_differences() {
    let search = ScriptedSearch::new(vec![candidate("abc123", "The Beatles", "Let It Be")]);

    let found = ExactMatch.find("Beatles", "Let It Be", &search).await.unwrap();

    assert_eq!(found, None);
}

#[tokio::test]
async fn test_normalized_match_strips_annotations() {
    let search = ScriptedSearch::new(vec![candidate("abc123", "The Beatles", "Let It Be")]);

    let found = NormalizedMatch
        .find("Beatles", "Let It Be - Remastered 2009", &search)
        .await
        .unwrap();

    assert_eq!(ids(found), Some("abc123".to_string()));
    // the query is sent without the version suffix
    assert_eq!(search.queries(), vec![("Beatles".to_string(), "Let It Be".to_string())]);
}

#[tokio::test]
async fn test_normalized_match_folds_diacritics_and_featuring() {
    let search = ScriptedSearch::new(vec![candidate("halo", "Beyoncé", "Halo")]);

    let found = NormalizedMatch
        .find("Beyonce feat. Someone", "Halo", &search)
        .await
        .unwrap();

    assert_eq!(ids(found), Some("halo".to_string()));
}

#[tokio::test]
async fn test_normalized_match_requires_same_artist() {
    let search = ScriptedSearch::new(vec![candidate("cover", "Some Cover Band", "Let It Be")]);

    let found = NormalizedMatch.find("Beatles", "Let It Be", &search).await.unwrap();

    assert_eq!(found, None);
}

#[tokio::test]
async fn test_normalized_match_skips_empty_title() {
    let search = ScriptedSearch::new(vec![candidate("x", "Nobody", "Anything")]);

    let found = NormalizedMatch.find("Nobody", "(feat. Nobody)", &search).await.unwrap();

    assert_eq!(found, None);
    assert_eq!(search.calls(), 0);
}

#[tokio::test]
async fn test_partial_match_accepts_containment() {
    let search = ScriptedSearch::new(vec![candidate("arahja", "Kult", "Arahja")]);

    let found = PartialMatch.find("Kult", "Arahja Live", &search).await.unwrap();

    assert_eq!(ids(found), Some("arahja".to_string()));
}

#[tokio::test]
async fn test_partial_match_queries_primary_artist() {
    let search = ScriptedSearch::new(vec![candidate(
        "came-for",
        "Calvin Harris",
        "This Is What You Came For",
    )]);

    let found = PartialMatch
        .find("Calvin Harris & Rihanna", "This Is What You Came For", &search)
        .await
        .unwrap();

    assert_eq!(ids(found), Some("came-for".to_string()));
    assert_eq!(
        search.queries(),
        vec![("Calvin Harris".to_string(), "This Is What You Came For".to_string())]
    );
}

#[tokio::test]
async fn test_partial_match_rejects_unrelated_titles() {
    let search = ScriptedSearch::new(vec![candidate("other", "Kult", "Polska")]);

    let found = PartialMatch.find("Kult", "Arahja", &search).await.unwrap();

    assert_eq!(found, None);
}

#[tokio::test]
async fn test_partial_match_requires_whole_words() {
    let search = ScriptedSearch::new(vec![candidate("wrong", "Fair Warning", "Alone")]);

    // "air" is inside "fair", but no credited artist is called Air
    let found = PartialMatch.find("Air", "Alone in Kyoto", &search).await.unwrap();

    assert_eq!(found, None);
}

#[tokio::test]
async fn test_partial_match_rejects_word_fragments_in_title() {
    let search = ScriptedSearch::new(vec![candidate("wrong", "Kult", "Arahjanka")]);

    let found = PartialMatch.find("Kult", "Arahja", &search).await.unwrap();

    assert_eq!(found, None);
}

#[tokio::test]
async fn test_partial_match_accepts_contiguous_words() {
    let search = ScriptedSearch::new(vec![candidate("kyoto", "Air", "Alone in Kyoto")]);

    let found = PartialMatch
        .find("Air & Someone", "Alone in Kyoto Reprise", &search)
        .await
        .unwrap();

    assert_eq!(ids(found), Some("kyoto".to_string()));
}

#[tokio::test]
async fn test_swapped_fields_searches_swapped() {
    let search = ScriptedSearch::new(vec![candidate("waterloo", "ABBA", "Waterloo")]);

    // the station announced "title - artist"
    let found = SwappedFields.find("Waterloo", "Abba", &search).await.unwrap();

    assert_eq!(ids(found), Some("waterloo".to_string()));
    assert_eq!(search.queries(), vec![("Abba".to_string(), "Waterloo".to_string())]);
}

#[tokio::test]
async fn test_swapped_fields_rejects_straight_order() {
    let search = ScriptedSearch::new(vec![candidate("waterloo", "ABBA", "Waterloo")]);

    let found = SwappedFields.find("Abba", "Waterloo", &search).await.unwrap();

    assert_eq!(found, None);
}

#[tokio::test]
async fn test_strategy_errors_propagate() {
    let search = FailingSearch::new();

    let result = ExactMatch.find("Abba", "Waterloo", &search).await;

    assert!(matches!(result, Err(SearchError::Unavailable(_))));
}

#[test]
fn test_default_strategy_order() {
    let names: Vec<&str> = default_strategies().iter().map(|s| s.name()).collect();

    assert_eq!(names, vec!["exact", "normalized", "partial", "swapped"]);
}

#[tokio::test]
async fn test_chain_stops_at_first_match() {
    let search = ScriptedSearch::new(vec![candidate("abc123", "The Beatles", "Let It Be")]);

    let found = find_in_chain(&default_strategies(), "Beatles", "Let It Be", &search)
        .await
        .unwrap();

    assert_eq!(ids(found), Some("abc123".to_string()));
    // exact missed, normalized matched, the rest never ran
    assert_eq!(search.calls(), 2);
}

#[tokio::test]
async fn test_chain_exhausted() {
    let search = ScriptedSearch::new(vec![candidate("x", "Somebody Else", "Another Song")]);

    let found = find_in_chain(&default_strategies(), "Abba", "Waterloo", &search)
        .await
        .unwrap();

    assert_eq!(found, None);
    assert_eq!(search.calls(), 4);
}

#[tokio::test]
async fn test_chain_with_no_candidates() {
    let search = ScriptedSearch::empty();

    let found = find_in_chain(&default_strategies(), "Abba", "Waterloo", &search)
        .await
        .unwrap();

    assert_eq!(found, None);
}

#[tokio::test]
async fn test_chain_aborts_on_error() {
    let search = FailingSearch::new();

    let result = find_in_chain(&default_strategies(), "Abba", "Waterloo", &search).await;

    assert!(result.is_err());
    assert_eq!(search.calls(), 1);
}

#[tokio::test]
async fn test_empty_chain() {
    let search = ScriptedSearch::new(vec![candidate("waterloo", "ABBA", "Waterloo")]);

    let found = find_in_chain(&[], "Abba", "Waterloo", &search).await.unwrap();

    assert_eq!(found, None);
    assert_eq!(search.calls(), 0);
}
