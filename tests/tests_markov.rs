// Released under MIT License.

//! Integration tests for the binding-mode transition analysis.

use std::fs;
use std::io::Write;
use std::path::Path;

use modekin::errors::WriteError;
use modekin::prelude::*;
use tempfile::{NamedTempFile, TempDir};

/// A small but realistic binding-mode sequence: three modes, one of which only
/// appears late in the trajectory.
const SEQUENCE: [&str; 20] = [
    "Mode_1", "Mode_1", "Mode_2", "Mode_2", "Mode_1", "Mode_1", "Mode_1", "Mode_2", "Mode_1",
    "Mode_1", "Mode_2", "Mode_2", "Mode_2", "Mode_3", "Mode_3", "Mode_3", "Mode_3", "Mode_2",
    "Mode_3", "Mode_3",
];

fn assert_diagram_files(directory: &Path, thresholds: &[&str]) {
    for threshold in thresholds {
        let path = directory.join(format!("markov_chain_plot_{}.png", threshold));
        assert!(path.is_file(), "missing diagram '{}'", path.display());

        let metadata = fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0, "empty diagram '{}'", path.display());
    }
}

#[test]
fn test_markov_basic_inline() {
    let directory = TempDir::new().unwrap();
    let path_to_dir = directory.path().join("markov");

    let analysis = Analysis::builder()
        .modes(SEQUENCE.to_vec())
        .min_transition(2.0)
        .output_directory(path_to_dir.to_str().unwrap())
        .silent()
        .overwrite()
        .build()
        .unwrap();

    analysis.run().unwrap().write().unwrap();

    assert_diagram_files(&path_to_dir, &["2", "4", "10", "20"]);
    assert_eq!(fs::read_dir(&path_to_dir).unwrap().count(), 4);
}

#[test]
fn test_markov_basic_modes_file() {
    let directory = TempDir::new().unwrap();
    let path_to_dir = directory.path().join("markov");

    let mut modes = NamedTempFile::new().unwrap();
    for label in SEQUENCE {
        writeln!(modes, "{}", label).unwrap();
    }
    modes.flush().unwrap();

    let analysis = Analysis::builder()
        .modes(modes.path().to_str().unwrap())
        .min_transition(5.0)
        .output_directory(path_to_dir.to_str().unwrap())
        .silent()
        .overwrite()
        .build()
        .unwrap();

    analysis.run().unwrap().write().unwrap();

    assert_diagram_files(&path_to_dir, &["5", "10", "25", "50"]);
}

#[test]
fn test_markov_fractional_threshold_filenames() {
    let directory = TempDir::new().unwrap();
    let path_to_dir = directory.path().join("markov");

    let analysis = Analysis::builder()
        .modes(SEQUENCE.to_vec())
        .min_transition(2.5)
        .output_directory(path_to_dir.to_str().unwrap())
        .silent()
        .overwrite()
        .build()
        .unwrap();

    analysis.run().unwrap().write().unwrap();

    assert_diagram_files(&path_to_dir, &["2.5", "5", "12.5", "25"]);
}

#[test]
fn test_markov_yaml_config() {
    let directory = TempDir::new().unwrap();
    let path_to_dir = directory.path().join("markov");

    let mut modes = NamedTempFile::new().unwrap();
    for label in SEQUENCE {
        writeln!(modes, "{}", label).unwrap();
    }
    modes.flush().unwrap();

    let mut config = NamedTempFile::new().unwrap();
    writeln!(
        config,
        "binding_modes: {}
minimum_transition: 2.0
output_directory: {}
font_size: 14
node_size: 250
silent: true
overwrite: true",
        modes.path().display(),
        path_to_dir.display(),
    )
    .unwrap();
    config.flush().unwrap();

    let analysis = Analysis::from_file(config.path()).unwrap();
    assert_eq!(analysis.font_size(), 14);
    assert_eq!(analysis.node_size(), 250);

    analysis.run().unwrap().write().unwrap();

    assert_diagram_files(&path_to_dir, &["2", "4", "10", "20"]);
}

#[test]
fn test_markov_empty_sequence_renders_nothing() {
    let directory = TempDir::new().unwrap();
    let path_to_dir = directory.path().join("markov");

    let analysis = Analysis::builder()
        .modes(Vec::<String>::new())
        .min_transition(2.0)
        .output_directory(path_to_dir.to_str().unwrap())
        .silent()
        .build()
        .unwrap();

    // not an error, but nothing is written
    analysis.run().unwrap().write().unwrap();
    assert!(!path_to_dir.exists());
}

#[test]
fn test_markov_single_frame_renders_nothing() {
    let directory = TempDir::new().unwrap();
    let path_to_dir = directory.path().join("markov");

    let analysis = Analysis::builder()
        .modes(vec!["Mode_1"])
        .min_transition(2.0)
        .output_directory(path_to_dir.to_str().unwrap())
        .silent()
        .build()
        .unwrap();

    analysis.run().unwrap().write().unwrap();
    assert!(!path_to_dir.exists());
}

#[test]
fn test_markov_overwrite_existing_directory() {
    let directory = TempDir::new().unwrap();
    let path_to_dir = directory.path().join("markov");

    for _ in 0..2 {
        let analysis = Analysis::builder()
            .modes(SEQUENCE.to_vec())
            .min_transition(10.0)
            .output_directory(path_to_dir.to_str().unwrap())
            .silent()
            .overwrite()
            .build()
            .unwrap();

        analysis.run().unwrap().write().unwrap();
    }

    assert_diagram_files(&path_to_dir, &["10", "20", "50", "100"]);

    // no backup directory was created next to the output directory
    assert_eq!(fs::read_dir(directory.path()).unwrap().count(), 1);
}

#[test]
fn test_markov_backup_existing_directory() {
    let directory = TempDir::new().unwrap();
    let path_to_dir = directory.path().join("markov");

    for _ in 0..2 {
        let analysis = Analysis::builder()
            .modes(SEQUENCE.to_vec())
            .min_transition(10.0)
            .output_directory(path_to_dir.to_str().unwrap())
            .silent()
            .build()
            .unwrap();

        analysis.run().unwrap().write().unwrap();
    }

    assert_diagram_files(&path_to_dir, &["10", "20", "50", "100"]);

    // the first output directory was backed up
    assert_eq!(fs::read_dir(directory.path()).unwrap().count(), 2);
}

#[test]
fn test_markov_render_failures_are_collected() {
    let directory = TempDir::new().unwrap();

    // a regular file blocks the output directory path; every diagram write
    // fails, but all thresholds must still be attempted and reported together
    let blocking_file = directory.path().join("markov");
    fs::File::create(&blocking_file).unwrap();

    let analysis = Analysis::builder()
        .modes(SEQUENCE.to_vec())
        .min_transition(2.0)
        .output_directory(blocking_file.to_str().unwrap())
        .silent()
        .overwrite()
        .build()
        .unwrap();

    let results = analysis.run().unwrap();
    match results.write() {
        Ok(_) => panic!("Function should have failed."),
        Err(WriteError::IncompleteRender { failed, attempted }) => {
            assert_eq!(attempted, 4);
            assert_eq!(failed, vec![2.0, 4.0, 10.0, 20.0]);
        }
        Err(e) => panic!("Unexpected error type `{}` returned.", e),
    }
}

#[test]
fn test_markov_missing_modes_file() {
    let analysis = Analysis::builder()
        .modes("this_file_does_not_exist.txt")
        .min_transition(2.0)
        .silent()
        .build()
        .unwrap();

    match analysis.run() {
        Ok(_) => panic!("Function should have failed."),
        Err(e) => assert!(e.to_string().contains("could not open")),
    }
}

#[test]
fn test_markov_invalid_label_in_modes_file() {
    let mut modes = NamedTempFile::new().unwrap();
    writeln!(modes, "Mode_1").unwrap();
    writeln!(modes, "Mode 2 with spaces").unwrap();
    modes.flush().unwrap();

    let analysis = Analysis::builder()
        .modes(modes.path().to_str().unwrap())
        .min_transition(2.0)
        .silent()
        .build()
        .unwrap();

    match analysis.run() {
        Ok(_) => panic!("Function should have failed."),
        Err(e) => assert!(e.to_string().contains("line")),
    }
}

#[test]
fn test_markov_invalid_min_transition() {
    for invalid in [0.0, -3.0, 120.0, f64::NAN] {
        match Analysis::builder()
            .modes(vec!["A", "B"])
            .min_transition(invalid)
            .build()
        {
            Ok(_) => panic!("Function should have failed."),
            Err(e) => assert!(e.to_string().contains("minimum transition")),
        }
    }
}

#[test]
fn test_markov_kinetics_accessible_from_results() {
    let analysis = Analysis::builder()
        .modes(SEQUENCE.to_vec())
        .min_transition(2.0)
        .silent()
        .build()
        .unwrap();

    let results = analysis.run().unwrap();
    let kinetics = results.kinetics();

    assert_eq!(results.n_frames(), 20);
    assert_eq!(kinetics.labels().n_states(), 3);
    assert_eq!(kinetics.counts().n_events(), 19);

    // Mode_3 only appears in the final third of the trajectory
    let mode_3 = kinetics
        .labels()
        .states()
        .find(|&state| kinetics.labels().state_name(state) == "Mode_3")
        .unwrap();
    assert_eq!(kinetics.occupancy().classify(mode_3), TemporalClass::Late);
}
