//! Scenario 7: LTSA round trip, parsing a small hand-written model.

use std::io::Write;

use opmodel_repair::ltsa;

fn write_temp_model(name: &str, contents: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("opmodel-repair-test-{}-{}.lts", std::process::id(), name));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn round_trips_a_small_model_from_disk() {
    let path = write_temp_model(
        "two-door",
        "MENU\n\
         TWO_DOOR\n\
         ---\n\
         2\n\
         ---\n\
         junk\n\
         junk\n\
         (enter -> Q1),\n\
         STOP\n",
    );

    let dfa = ltsa::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(dfa.state_count(), 2);
    assert_eq!(dfa.alphabet_len(), 1);
    assert_eq!(dfa.step(0, "enter").unwrap(), Some(1));
    assert_eq!(dfa.step(1, "enter").unwrap(), Some(1));
}

#[test]
fn missing_file_surfaces_as_an_io_error() {
    let err = ltsa::load("/nonexistent/path/to/a/model.lts").unwrap_err();
    assert!(matches!(err, opmodel_repair::EngineError::Io(_)));
}
