use super::*;

fn row(pairs: &[(&str, &str)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn teams(rows: &[Row]) -> Vec<&str> {
    rows.iter()
        .map(|r| r.get("Team").map(String::as_str).unwrap_or(""))
        .collect()
}

#[test]
fn outer_merge_keeps_unmatched_rows_from_both_sides() {
    let men = vec![
        row(&[("Team", "Kansas"), ("Conference", "Big 12")]),
        row(&[("Team", "Army"), ("Conference", "Patriot")]),
    ];
    let women = vec![
        row(&[("Team", "Kansas"), ("Conference", "Big 12")]),
        row(&[("Team", "UConn"), ("Conference", "Big East")]),
    ];

    let merged = merge_outer(&men, &women, "Team", ("_M", "_W"));
    assert_eq!(teams(&merged), vec!["Kansas", "Army", "UConn"]);

    // Matched row carries both suffixed conferences.
    assert_eq!(merged[0]["Conference_M"], "Big 12");
    assert_eq!(merged[0]["Conference_W"], "Big 12");

    // Men-only row has no women's columns and vice versa.
    assert_eq!(merged[1]["Conference_M"], "Patriot");
    assert!(!merged[1].contains_key("Conference_W"));
    assert_eq!(merged[2]["Conference_W"], "Big East");
    assert!(!merged[2].contains_key("Conference_M"));
}

#[test]
fn outer_merge_key_column_is_never_suffixed() {
    let left = vec![row(&[("Team", "Kansas"), ("Wins", "12")])];
    let right = vec![row(&[("Team", "Kansas"), ("Wins", "10")])];

    let merged = merge_outer(&left, &right, "Team", ("_M", "_W"));
    assert_eq!(merged[0]["Team"], "Kansas");
    assert_eq!(merged[0]["Wins_M"], "12");
    assert_eq!(merged[0]["Wins_W"], "10");
    assert!(!merged[0].contains_key("Wins"));
}

#[test]
fn left_merge_keeps_every_left_row() {
    let rpi = vec![
        row(&[("Team", "Kansas"), ("RPI Rank", "1")]),
        row(&[("Team", "Army"), ("RPI Rank", "2")]),
    ];
    let offense = vec![row(&[("Team", "Kansas"), ("PPG", "81.4")])];

    let merged = merge_left(&rpi, &offense, "Team");
    assert_eq!(teams(&merged), vec!["Kansas", "Army"]);
    assert_eq!(merged[0]["PPG"], "81.4");
    assert!(!merged[1].contains_key("PPG"));
}

#[test]
fn left_merge_drops_right_only_rows() {
    let rpi = vec![row(&[("Team", "Kansas")])];
    let offense = vec![
        row(&[("Team", "Kansas"), ("PPG", "81.4")]),
        row(&[("Team", "Duke"), ("PPG", "79.0")]),
    ];

    let merged = merge_left(&rpi, &offense, "Team");
    assert_eq!(teams(&merged), vec!["Kansas"]);
}

#[test]
fn inner_merge_keeps_only_matched_rows() {
    let men = vec![
        row(&[("Team", "Kansas"), ("RPI Rank", "1")]),
        row(&[("Team", "Army"), ("RPI Rank", "2")]),
    ];
    let women = vec![
        row(&[("Team", "Kansas"), ("RPI Rank", "3")]),
        row(&[("Team", "UConn"), ("RPI Rank", "1")]),
    ];

    let merged = merge_inner(&men, &women, "Team", ("_M", "_W"));
    assert_eq!(teams(&merged), vec!["Kansas"]);
    assert_eq!(merged[0]["RPI Rank_M"], "1");
    assert_eq!(merged[0]["RPI Rank_W"], "3");
}

#[test]
fn right_side_duplicate_keys_first_seen_wins() {
    let left = vec![row(&[("Team", "Kansas")])];
    let right = vec![
        row(&[("Team", "Kansas"), ("PPG", "81.4")]),
        row(&[("Team", "Kansas"), ("PPG", "99.9")]),
    ];

    let merged = merge_left(&left, &right, "Team");
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0]["PPG"], "81.4");
}

#[test]
fn rows_missing_the_key_match_nothing() {
    let left = vec![row(&[("Conference", "Big 12")])];
    let right = vec![row(&[("Team", "Kansas"), ("PPG", "81.4")])];

    let inner = merge_inner(&left, &right, "Team", ("_M", "_W"));
    assert!(inner.is_empty());

    let outer = merge_outer(&left, &right, "Team", ("_M", "_W"));
    assert_eq!(outer.len(), 2);
}

#[test]
fn sort_by_text_is_ascending_and_stable() {
    let mut rows = vec![
        row(&[("Team", "Duke"), ("n", "1")]),
        row(&[("Team", "Army"), ("n", "2")]),
        row(&[("Team", "Duke"), ("n", "3")]),
    ];
    sort_by_text(&mut rows, "Team");

    assert_eq!(teams(&rows), vec!["Army", "Duke", "Duke"]);
    assert_eq!(rows[1]["n"], "1");
    assert_eq!(rows[2]["n"], "3");
}
