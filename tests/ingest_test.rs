//! End-to-end ingestion tests: parse extraction documents, bootstrap
//! schools, rank categories, and write dated snapshots.

use chrono::NaiveDate;
use serde_json::{json, Value};

use ncaabb::commands::bootstrap::bootstrap_schools;
use ncaabb::commands::refresh::{write_school_snapshots, write_team_snapshots};
use ncaabb::extractor::parse_records;
use ncaabb::pipeline::{merge_left, rank_by, Row, SortDirection};
use ncaabb::storage::Category;
use ncaabb::RankingsDatabase;

fn row(pairs: &[(&str, &str)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn rpi_document(rows: &[(&str, &str, &str, &str, &str)]) -> Value {
    let group: Vec<Value> = rows
        .iter()
        .map(|(team, conference, rank, wins, losses)| {
            json!({
                "Team": [{ "text": team }],
                "Conference": [{ "text": conference }],
                "RPI Rank": [{ "text": rank }],
                "Wins": [{ "text": wins }],
                "Losses": [{ "text": losses }],
            })
        })
        .collect();
    json!({ "result": { "extractorData": { "data": [{ "group": group }] } } })
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Merged category table the refresh path produces before writing:
/// RPI left-merged with ranked offense and defense.
fn category_table(rpi: Vec<Row>, offense: Vec<Row>, defense: Vec<Row>) -> Vec<Row> {
    let offense = rank_by(offense, "PPG", SortDirection::Descending, "Offense Rank");
    let defense = rank_by(defense, "OPPG", SortDirection::Ascending, "Defense Rank");
    let with_offense = merge_left(&rpi, &offense, "Team");
    merge_left(&with_offense, &defense, "Team")
}

#[test]
fn bootstrap_from_extraction_documents() {
    let men = parse_records(&[rpi_document(&[
        ("Kansas", "Big 12", "1", "14", "1"),
        ("Army", "Patriot", "2", "12", "3"),
    ])]);
    let women = parse_records(&[rpi_document(&[
        ("Kansas", "Big 12", "3", "13", "2"),
        ("UConn", "Big East", "1", "15", "0"),
    ])]);

    let mut db = RankingsDatabase::open_in_memory().unwrap();
    let summary = bootstrap_schools(&mut db, &men, &women).unwrap();

    assert_eq!(summary.inserted, 3);
    assert_eq!(summary.skipped, 0);
    assert_eq!(db.school_count().unwrap(), 3);

    // Both categories for Kansas, one each for Army and UConn.
    let kansas = db.school_by_name("Kansas").unwrap().unwrap();
    assert_eq!(db.teams_for_school(kansas.id).unwrap().len(), 2);

    let army = db.school_by_name("Army").unwrap().unwrap();
    let army_teams = db.teams_for_school(army.id).unwrap();
    assert_eq!(army_teams.len(), 1);
    assert_eq!(army_teams[0].category, Category::Men);

    let uconn = db.school_by_name("UConn").unwrap().unwrap();
    let uconn_teams = db.teams_for_school(uconn.id).unwrap();
    assert_eq!(uconn_teams.len(), 1);
    assert_eq!(uconn_teams[0].category, Category::Women);
}

#[test]
fn bootstrap_prefers_mens_conference_when_both_present() {
    let men = parse_records(&[rpi_document(&[("Kansas", "Big 12", "1", "14", "1")])]);
    let women = parse_records(&[rpi_document(&[("Kansas", "Big 12 Women", "3", "13", "2")])]);

    let mut db = RankingsDatabase::open_in_memory().unwrap();
    let summary = bootstrap_schools(&mut db, &men, &women).unwrap();
    assert_eq!(summary.inserted, 1);

    // Both sides list the school, so it gets two teams but the men's
    // conference value.
    let kansas = db.school_by_name("Kansas").unwrap().unwrap();
    assert_eq!(kansas.conference, "Big 12");
    assert_eq!(db.teams_for_school(kansas.id).unwrap().len(), 2);
}

#[test]
fn rerunning_bootstrap_skips_existing_schools() {
    let men = parse_records(&[rpi_document(&[("Kansas", "Big 12", "1", "14", "1")])]);
    let women = parse_records(&[rpi_document(&[("UConn", "Big East", "1", "15", "0")])]);

    let mut db = RankingsDatabase::open_in_memory().unwrap();
    let first = bootstrap_schools(&mut db, &men, &women).unwrap();
    assert_eq!(first.inserted, 2);

    let second = bootstrap_schools(&mut db, &men, &women).unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, 2);
    assert_eq!(db.school_count().unwrap(), 2);
}

#[test]
fn refresh_writes_team_and_school_snapshots() {
    let mut db = RankingsDatabase::open_in_memory().unwrap();
    for (name, conference, categories) in [
        ("A", "X", vec![Category::Men, Category::Women]),
        ("B", "Y", vec![Category::Men, Category::Women]),
        ("MenOnly", "Z", vec![Category::Men]),
    ] {
        db.insert_school_with_teams(name, conference, &categories)
            .unwrap();
    }

    let men = category_table(
        vec![
            row(&[("Team", "A"), ("RPI Rank", "2"), ("Wins", "10"), ("Losses", "2")]),
            row(&[("Team", "B"), ("RPI Rank", "5"), ("Wins", "8"), ("Losses", "4")]),
            row(&[("Team", "MenOnly"), ("RPI Rank", "1"), ("Wins", "12"), ("Losses", "0")]),
        ],
        vec![
            row(&[("Team", "A"), ("PPG", "80.0")]),
            row(&[("Team", "B"), ("PPG", "85.0")]),
        ],
        vec![row(&[("Team", "A"), ("OPPG", "60.0")])],
    );
    let women = category_table(
        vec![
            row(&[("Team", "A"), ("RPI Rank", "4"), ("Wins", "9"), ("Losses", "3")]),
            row(&[("Team", "B"), ("RPI Rank", "3"), ("Wins", "11"), ("Losses", "1")]),
        ],
        vec![row(&[("Team", "A"), ("PPG", "75.0")])],
        vec![row(&[("Team", "A"), ("OPPG", "55.0")])],
    );

    let date = day("2026-02-10");
    assert_eq!(
        write_team_snapshots(&mut db, Category::Men, &men, date).unwrap(),
        3
    );
    assert_eq!(
        write_team_snapshots(&mut db, Category::Women, &women, date).unwrap(),
        2
    );

    // Offense was ranked descending by PPG: B first, A second; A is the
    // only defense entry. MenOnly has no offense/defense rows at all.
    let school_a = db.school_by_name("A").unwrap().unwrap();
    let men_team_a = db.team_for_school(school_a.id, Category::Men).unwrap().unwrap();
    let snapshots = db.team_snapshots(men_team_a.id).unwrap();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].rank, 2);
    assert_eq!(snapshots[0].off_rank, Some(2));
    assert_eq!(snapshots[0].def_rank, Some(1));
    assert_eq!(snapshots[0].ppg, Some(80.0));
    assert_eq!(snapshots[0].oppg, Some(60.0));

    let men_only = db.school_by_name("MenOnly").unwrap().unwrap();
    let men_only_team = db.team_for_school(men_only.id, Category::Men).unwrap().unwrap();
    let men_only_snapshots = db.team_snapshots(men_only_team.id).unwrap();
    assert_eq!(men_only_snapshots.len(), 1);
    assert_eq!(men_only_snapshots[0].off_rank, None);
    assert_eq!(men_only_snapshots[0].def_rank, None);
    assert_eq!(men_only_snapshots[0].ppg, None);
    assert_eq!(men_only_snapshots[0].oppg, None);

    // Composite ranking: A scores (2 + 4) / 2 = 3.0, B scores
    // (5 + 3) / 2 = 4.0, so A is overall rank 1. MenOnly is excluded
    // from the school ranking even though its team snapshot exists.
    let written = write_school_snapshots(&mut db, &men, &women, date).unwrap();
    assert_eq!(written, 2);

    let rankings = db.school_rankings(date, 1, 10).unwrap();
    assert_eq!(rankings.len(), 2);
    assert_eq!(rankings[0].name, "A");
    assert_eq!(rankings[0].rank, 1);
    assert_eq!(rankings[1].name, "B");
    assert_eq!(rankings[1].rank, 2);
    assert!(rankings.iter().all(|r| r.name != "MenOnly"));

    assert_eq!(db.latest_snapshot_date().unwrap(), Some(date));
}

#[test]
fn unknown_teams_are_skipped_not_fatal() {
    let mut db = RankingsDatabase::open_in_memory().unwrap();
    db.insert_school_with_teams("Known", "X", &[Category::Men])
        .unwrap();

    let table = vec![
        row(&[("Team", "Known"), ("RPI Rank", "1"), ("Wins", "10"), ("Losses", "0")]),
        row(&[("Team", "Unknown"), ("RPI Rank", "2"), ("Wins", "9"), ("Losses", "1")]),
    ];

    let written = write_team_snapshots(&mut db, Category::Men, &table, day("2026-02-10")).unwrap();
    assert_eq!(written, 1);
    assert_eq!(db.team_snapshot_count().unwrap(), 1);
}

#[test]
fn same_day_refresh_is_idempotent() {
    let mut db = RankingsDatabase::open_in_memory().unwrap();
    db.insert_school_with_teams("A", "X", &[Category::Men, Category::Women])
        .unwrap();

    let men = vec![row(&[
        ("Team", "A"),
        ("RPI Rank", "2"),
        ("Wins", "10"),
        ("Losses", "2"),
    ])];
    let women = vec![row(&[
        ("Team", "A"),
        ("RPI Rank", "4"),
        ("Wins", "9"),
        ("Losses", "3"),
    ])];

    let date = day("2026-02-10");
    for _ in 0..2 {
        write_team_snapshots(&mut db, Category::Men, &men, date).unwrap();
        write_team_snapshots(&mut db, Category::Women, &women, date).unwrap();
        write_school_snapshots(&mut db, &men, &women, date).unwrap();
    }

    assert_eq!(db.team_snapshot_count().unwrap(), 2);
    let rankings = db.school_rankings(date, 1, 10).unwrap();
    assert_eq!(rankings.len(), 1);
}
