use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

fn snpflank() -> Command {
    Command::new(env!("CARGO_BIN_EXE_snpflank"))
}

/// Helper function to run a golden test with extra arguments.
///
/// Runs snpflank on the subset database and marker list, excluding the
/// markers in `excluded.txt`, and compares the output with a golden file.
fn run_golden_test(
    extra_args: &[&str],
    golden_filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = data_dir();
    let golden_path = data_dir.join(golden_filename);

    // Use a temp file for output to avoid polluting source tree
    let output_file = NamedTempFile::new()?;
    let output_path = output_file.path();

    snpflank()
        .arg("-g")
        .arg(data_dir.join("seq_gene_subset.md"))
        .arg("-m")
        .arg(data_dir.join("markers.txt"))
        .arg("-e")
        .arg(data_dir.join("excluded.txt"))
        .arg("-o")
        .arg(output_path)
        .args(extra_args)
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "# The following markers were not found in the database:\n7\n10\n",
        ));

    let output_reader = BufReader::new(File::open(output_path)?);
    let golden_reader = BufReader::new(File::open(&golden_path)?);

    let mut line_num = 0;
    for (out_line, gold_line) in output_reader.lines().zip(golden_reader.lines()) {
        line_num += 1;
        let out_line = out_line?;
        let gold_line = gold_line?;

        if out_line != gold_line {
            panic!(
                "Mismatch at line {} (args={:?}): \nExpected: {}\nActual:   {}",
                line_num, extra_args, gold_line, out_line
            );
        }
    }

    // Catch extra or missing lines
    let out_len = fs::metadata(output_path)?.len();
    let gold_len = fs::metadata(&golden_path)?.len();
    if out_len != gold_len {
        panic!(
            "File sizes differ (args={:?}): Output: {} bytes, Golden: {} bytes",
            extra_args, out_len, gold_len
        );
    }

    Ok(())
}

#[test]
fn test_golden_output_nearest() -> Result<(), Box<dyn std::error::Error>> {
    run_golden_test(&[], "golden_nearest.txt")
}

#[test]
fn test_golden_output_explicit_negative_threshold() -> Result<(), Box<dyn std::error::Error>> {
    run_golden_test(&["-d", "-5"], "golden_nearest.txt")
}

#[test]
fn test_golden_output_within_20k() -> Result<(), Box<dyn std::error::Error>> {
    run_golden_test(&["-d", "20k"], "golden_within_20k.txt")
}

#[test]
fn test_golden_output_within_20000() -> Result<(), Box<dyn std::error::Error>> {
    run_golden_test(&["--distance", "20000"], "golden_within_20k.txt")
}

#[test]
fn test_gzip_database_matches_plain() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = data_dir();
    let plain = fs::read(data_dir.join("seq_gene_subset.md"))?;

    let gz_file = NamedTempFile::new()?;
    let mut encoder = GzEncoder::new(File::create(gz_file.path())?, Compression::default());
    encoder.write_all(&plain)?;
    encoder.finish()?;

    let golden = fs::read_to_string(data_dir.join("golden_nearest.txt"))?;
    snpflank()
        .arg("-g")
        .arg(gz_file.path())
        .arg("-m")
        .arg(data_dir.join("markers.txt"))
        .arg("-e")
        .arg(data_dir.join("excluded.txt"))
        .assert()
        .success()
        .stdout(golden);
    Ok(())
}

#[test]
fn test_without_exclusions_marker_nine_is_annotated() {
    let data_dir = data_dir();
    snpflank()
        .arg("-g")
        .arg(data_dir.join("seq_gene_subset.md"))
        .arg("-m")
        .arg(data_dir.join("markers.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("9\t100\tGENEA\t5000\t5\n9\t100\tGENEA\t15000\t3\n"));
}

#[test]
fn test_print_db() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = data_dir();
    let output = snpflank()
        .arg("-g")
        .arg(data_dir.join("seq_gene_subset.md"))
        .arg("-p")
        .output()?;
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout)?;
    let rows: Vec<Vec<&str>> = text.lines().map(|l| l.split_whitespace().collect()).collect();
    assert_eq!(
        rows,
        vec![
            vec!["1", "NT_1", "100", "GENEA", "10000", "20000", "+", "GRCh37"],
            vec!["1", "NT_1", "200", "GENEB", "70000", "50000", "-", "GRCh37"],
            vec!["7", "NT_7", "300", "GENEC", "3100", "4100", "+", "GRCh37"],
            vec!["7", "NT_7", "400", "GENED", "21000", "20000", "-", "CRA_TCAGchr7v2"],
            vec!["7", "NT_7alt", "450", "GENEF", "500", "800", "+", "CRA_TCAGchr7v2"],
            vec!["23", "NT_X", "600", "GENEX", "100", "300", "+", "GRCh37"],
        ]
    );
    assert!(text.lines().all(|l| l.len() == 87));
    Ok(())
}

#[test]
fn test_print_db_chromosome_coordinates() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = data_dir();
    let output = snpflank()
        .arg("-g")
        .arg(data_dir.join("seq_gene_subset.md"))
        .arg("-p")
        .arg("-c")
        .output()?;
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout)?;
    let first: Vec<&str> = text.lines().next().unwrap_or("").split_whitespace().collect();
    assert_eq!(first, vec!["1", "NT_1", "100", "GENEA", "1010000", "1020000", "+", "GRCh37"]);
    Ok(())
}

#[test]
fn test_chromosome_coordinates_mode() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = data_dir();
    let mut markers = NamedTempFile::new()?;
    writeln!(markers, "1\t1\tNT_1\t1005000")?;
    markers.flush()?;

    snpflank()
        .arg("-g")
        .arg(data_dir.join("seq_gene_subset.md"))
        .arg("-m")
        .arg(markers.path())
        .arg("-c")
        .assert()
        .success()
        .stdout("1\t100\tGENEA\t5000\t5\n1\t100\tGENEA\t15000\t3\n");
    Ok(())
}

#[test]
fn test_missing_markers_argument() {
    let data_dir = data_dir();
    snpflank()
        .arg("-g")
        .arg(data_dir.join("seq_gene_subset.md"))
        .assert()
        .failure();
}

#[test]
fn test_missing_database_fails() {
    let data_dir = data_dir();
    snpflank()
        .arg("-g")
        .arg(data_dir.join("does_not_exist.md"))
        .arg("-m")
        .arg(data_dir.join("markers.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open gene database"));
}

#[test]
fn test_malformed_orientation_fails() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = data_dir();
    let mut db = NamedTempFile::new()?;
    writeln!(
        db,
        "9606\t1\t1\t2\t?\tNT_1\t1\t2\t?\tBAD\tGeneID:1\tGENE\tGRCh37.p10-Primary Assembly\t-\t-"
    )?;
    db.flush()?;

    snpflank()
        .arg("-g")
        .arg(db.path())
        .arg("-m")
        .arg(data_dir.join("markers.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown orientation"));
    Ok(())
}

#[test]
fn test_invalid_threshold_rejected() {
    let data_dir = data_dir();
    snpflank()
        .arg("-g")
        .arg(data_dir.join("seq_gene_subset.md"))
        .arg("-m")
        .arg(data_dir.join("markers.txt"))
        .arg("-d")
        .arg("far")
        .assert()
        .failure();
}
