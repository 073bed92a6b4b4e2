mod common;

use common::temp_ranking;
use keyrank::store::OrderedList;
use keyrank::{KeyRankError, Ngram};
use std::fs;

#[test]
fn test_missing_file_is_empty_list() {
    let t = temp_ranking();
    let store = OrderedList::open(&t.path).unwrap();
    assert!(store.is_empty());
    assert!(!t.path.exists(), "opening must not create the file");
}

#[test]
fn test_append_persists_immediately() {
    let t = temp_ranking();
    let mut store = OrderedList::open(&t.path).unwrap();

    store.append_at(0, Ngram::bigram(0, 1)).unwrap();
    assert_eq!(fs::read_to_string(&t.path).unwrap(), "0,1\n");

    store.append_at(0, Ngram::unigram(2)).unwrap();
    store.append_at(2, Ngram::trigram(0, 2, 1)).unwrap();
    assert_eq!(fs::read_to_string(&t.path).unwrap(), "2\n0,1\n0,2,1\n");

    assert_eq!(store.rank_of(&Ngram::bigram(0, 1)), Some(1));
    assert_eq!(store.get(2), Some(&Ngram::trigram(0, 2, 1)));
    assert!(store.contains(&Ngram::unigram(2)));
    assert!(!store.contains(&Ngram::bigram(1, 0)));
}

#[test]
fn test_round_trip_is_byte_identical() {
    let t = temp_ranking();
    let content = "5\n0,2,1\n3,3\n";
    fs::write(&t.path, content).unwrap();

    let store = OrderedList::open(&t.path).unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(
        store.to_records(),
        vec![vec![5], vec![0, 2, 1], vec![3, 3]]
    );

    let copy = t.dir.path().join("copy.txt");
    store.save(&copy).unwrap();
    assert_eq!(fs::read_to_string(&copy).unwrap(), content);
}

#[test]
fn test_round_trip_empty_list() {
    let t = temp_ranking();
    fs::write(&t.path, "").unwrap();

    let store = OrderedList::open(&t.path).unwrap();
    assert!(store.is_empty());

    let copy = t.dir.path().join("copy.txt");
    store.save(&copy).unwrap();
    assert_eq!(fs::read(&copy).unwrap(), b"");
    assert!(OrderedList::open(&copy).unwrap().is_empty());
}

#[test]
fn test_duplicate_insert_rejected() {
    let t = temp_ranking();
    let mut store = OrderedList::open(&t.path).unwrap();
    store.append_at(0, Ngram::bigram(0, 1)).unwrap();

    let err = store.append_at(1, Ngram::bigram(0, 1)).unwrap_err();
    assert!(matches!(err, KeyRankError::DuplicateNgram(_)));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_position_past_end_rejected() {
    let t = temp_ranking();
    let mut store = OrderedList::open(&t.path).unwrap();
    let err = store.append_at(1, Ngram::unigram(0)).unwrap_err();
    assert!(matches!(err, KeyRankError::Validation(_)));
    assert!(!t.path.exists());
}

#[test]
fn test_corrupt_files_are_not_repaired() {
    let cases = ["0,1\n0,1\n", "0,\n", "a,b\n", "1,2,3,4\n", "0,1\n-1\n"];
    for content in cases {
        let t = temp_ranking();
        fs::write(&t.path, content).unwrap();

        match OrderedList::open(&t.path) {
            Err(KeyRankError::CorruptStore { .. }) => {}
            other => panic!("{:?} should be corrupt, got {:?}", content, other.map(|s| s.len())),
        }
        assert_eq!(fs::read_to_string(&t.path).unwrap(), content);
    }
}

#[test]
fn test_external_modification_detected() {
    let t = temp_ranking();
    let mut store = OrderedList::open(&t.path).unwrap();
    store.append_at(0, Ngram::unigram(0)).unwrap();

    // Another writer appends behind our back
    fs::write(&t.path, "0\n1\n").unwrap();

    let err = store.append_at(1, Ngram::unigram(2)).unwrap_err();
    assert!(matches!(err, KeyRankError::StoreModified(_)));
    assert_eq!(store.len(), 1);
    assert_eq!(fs::read_to_string(&t.path).unwrap(), "0\n1\n");
}

#[test]
fn test_file_created_by_someone_else_detected() {
    let t = temp_ranking();
    let mut store = OrderedList::open(&t.path).unwrap();
    fs::write(&t.path, "7\n").unwrap();

    assert!(matches!(
        store.append_at(0, Ngram::unigram(0)),
        Err(KeyRankError::StoreModified(_))
    ));
}

#[test]
fn test_failed_persist_leaves_state_unchanged() {
    let t = temp_ranking();
    let mut store = OrderedList::open(&t.path).unwrap();
    store.append_at(0, Ngram::unigram(0)).unwrap();

    // Occupy the temp file name with a directory so the write fails
    let blocker = t.dir.path().join("ranking.txt.tmp");
    fs::create_dir(&blocker).unwrap();

    assert!(store.append_at(1, Ngram::unigram(1)).is_err());
    assert_eq!(store.len(), 1);
    assert!(!store.contains(&Ngram::unigram(1)));
    assert_eq!(fs::read_to_string(&t.path).unwrap(), "0\n");

    // Once the obstacle is gone the same insert succeeds
    fs::remove_dir(&blocker).unwrap();
    store.append_at(1, Ngram::unigram(1)).unwrap();
    assert_eq!(fs::read_to_string(&t.path).unwrap(), "0\n1\n");
}
