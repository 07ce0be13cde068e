//! Tests for the profile service layer.

use tempfile::NamedTempFile;
use tictac_arena::{GameRepository, GameResult, MAX_NAME_LEN, ProfileService};

fn setup_service() -> (NamedTempFile, ProfileService) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = GameRepository::open(db_path).expect("Failed to open repository");
    (db_file, ProfileService::new(repo))
}

#[test]
fn test_register_is_get_or_create() {
    let (_db, service) = setup_service();
    let first = service.register("Ada").expect("Register failed");
    let again = service.register("  Ada ").expect("Register failed");
    assert_eq!(first.id(), again.id());
    assert_eq!(again.display_name(), "Ada");
    assert_eq!(service.repository().list_users().expect("List failed").len(), 1);
}

#[test]
fn test_register_rejects_bad_names() {
    let (_db, service) = setup_service();
    assert!(service.register("").is_err());
    assert!(service.register("   ").is_err());
    assert!(service.register(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
    assert!(service.register(&"x".repeat(MAX_NAME_LEN)).is_ok());
}

#[test]
fn test_find_unknown_user() {
    let (_db, service) = setup_service();
    let err = service.find("Nobody").expect_err("Lookup should fail");
    assert!(err.message.contains("not found"));
}

#[test]
fn test_record_result_for_unknown_user_fails() {
    let (_db, service) = setup_service();
    assert!(service.record_game_result(77, GameResult::Win, 5).is_err());
}

#[test]
fn test_record_result_rejects_impossible_move_count() {
    let (_db, service) = setup_service();
    let user = service.register("Bea").expect("Register failed");
    assert!(service.record_game_result(*user.id(), GameResult::Draw, 10).is_err());
    assert!(service.record_game_result(*user.id(), GameResult::Draw, -1).is_err());
    assert!(service.get_history(*user.id()).expect("History failed").is_empty());
}

#[test]
fn test_stats_and_history() {
    let (_db, service) = setup_service();
    let user = service.register("Cy").expect("Register failed");

    service.record_game_result(*user.id(), GameResult::Loss, 6).expect("Record failed");
    service.record_game_result(*user.id(), GameResult::Draw, 9).expect("Record failed");

    let stats = service.get_stats(*user.id()).expect("Stats failed");
    assert_eq!(*stats.total_games(), 2);
    assert_eq!(*stats.losses(), 1);
    assert_eq!(*stats.draws(), 1);

    let history = service.get_history(*user.id()).expect("History failed");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].result().expect("Bad outcome"), GameResult::Draw);
}

#[test]
fn test_leaderboard_limit() {
    let (_db, service) = setup_service();
    for (name, wins) in [("Low", 1), ("High", 3), ("Mid", 2)] {
        let user = service.register(name).expect("Register failed");
        for _ in 0..wins {
            service.record_game_result(*user.id(), GameResult::Win, 5).expect("Record failed");
        }
    }

    let all = service.leaderboard(None).expect("Leaderboard failed");
    let names: Vec<&str> = all.iter().map(|e| e.display_name().as_str()).collect();
    assert_eq!(names, ["High", "Mid", "Low"]);

    let top = service.leaderboard(Some(2)).expect("Leaderboard failed");
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].display_name(), "High");
    assert_eq!(*top[0].score(), 9);
}

#[test]
fn test_leaderboard_json_flattens_stats() {
    let (_db, service) = setup_service();
    let user = service.register("Json").expect("Register failed");
    service.record_game_result(*user.id(), GameResult::Draw, 9).expect("Record failed");

    let entries = service.leaderboard(None).expect("Leaderboard failed");
    let value = serde_json::to_value(&entries[0]).expect("Serialize failed");
    assert_eq!(value["display_name"], "Json");
    assert_eq!(value["draws"], 1);
    assert_eq!(value["score"], 1);
}
