use std::fs;
use std::path::Path;

use tdc_cli::input::Settings;
use tdc_cli::runner::Runner;

fn run(path: &Path, fdr_threshold: f64) -> anyhow::Result<()> {
    let settings = Settings {
        psm_file: path.to_string_lossy().into_owned(),
        fdr_threshold,
        decoy_prefix: String::from("DECOY_"),
    };
    Runner::new(settings).run()
}

#[test]
fn decoy_heavy_top_ranks_filter_to_an_empty_set() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("psms.txt");
    fs::write(
        &path,
        "CometVersion 2024.01 rev. 0\n\
         scan\txcorr\tprotein\n\
         1\t10\tDECOY_A\n\
         2\t9\tP1\n\
         3\t8\tP2,DECOY_B\n\
         4\t7\tDECOY_C\n",
    )?;

    // estimates come out as [1.0, 0.5, 1/3, 0.5]; nothing is at or below 0.3
    run(&path, 0.3)?;

    let written = fs::read_to_string(&path)?;
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("CometVersion 2024.01 rev. 0"));
    assert_eq!(lines.next(), Some("scan\txcorr\tprotein\tfdr"));
    assert_eq!(lines.next(), None);
    Ok(())
}

#[test]
fn preamble_survives_and_targets_keep_their_estimates() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("psms.txt");
    fs::write(
        &path,
        "CometVersion 2024.01 rev. 0\n\
         scan\txcorr\tprotein\n\
         1\t10\tDECOY_A\n\
         2\t9\tP1\n\
         3\t8\tP2,DECOY_B\n\
         4\t7\tDECOY_C\n",
    )?;

    run(&path, 1.0)?;

    let written = fs::read_to_string(&path)?;
    assert_eq!(
        written,
        "CometVersion 2024.01 rev. 0\n\
         scan\txcorr\tprotein\tfdr\n\
         2\t9\tP1\t0.5\n\
         3\t8\tP2,DECOY_B\t0.3333333333333333\n"
    );
    Ok(())
}

#[test]
fn unsorted_input_is_ranked_by_score_before_estimation() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("psms.txt");
    fs::write(
        &path,
        "CometVersion 2024.01 rev. 0\n\
         scan\txcorr\tprotein\n\
         1\t2.1\tDECOY_A\n\
         2\t7.5\tP1\n\
         3\t4.0\tP2\n",
    )?;

    run(&path, 0.05)?;

    // the decoy has the worst score, so both targets precede it and pass
    let written = fs::read_to_string(&path)?;
    assert_eq!(
        written,
        "CometVersion 2024.01 rev. 0\n\
         scan\txcorr\tprotein\tfdr\n\
         2\t7.5\tP1\t0.0\n\
         3\t4.0\tP2\t0.0\n"
    );
    Ok(())
}

#[test]
fn header_only_input_round_trips() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("psms.txt");
    fs::write(&path, "CometVersion 2024.01 rev. 0\nscan\txcorr\tprotein\n")?;

    run(&path, 0.05)?;

    let written = fs::read_to_string(&path)?;
    assert_eq!(
        written,
        "CometVersion 2024.01 rev. 0\nscan\txcorr\tprotein\tfdr\n"
    );
    Ok(())
}

#[test]
fn missing_protein_column_aborts_before_any_write() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("psms.txt");
    let original = "CometVersion 2024.01 rev. 0\nscan\txcorr\n1\t4.2\n";
    fs::write(&path, original)?;

    let err = run(&path, 0.05).unwrap_err();
    assert!(err.to_string().contains("protein"));

    // the run failed before the rewrite, so the file is untouched
    assert_eq!(fs::read_to_string(&path)?, original);
    Ok(())
}
