//! Runs a solution command over a built suite and judges every output.

use crate::checker;
use crate::suite::SuiteConfig;
use anyhow::{Context, Result};
use serde::{Serialize, Serializer};
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Instant;

/// Exit code of coreutils `timeout` when the limit is hit.
const TIMEOUT_EXIT_CODE: i32 = 124;

/// Default wall-clock limit per test, in seconds.
pub const DEFAULT_TIME_LIMIT: f64 = 1.0;

/// One row of the report. Field names are the report's column headers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CaseReport {
    pub test: String,
    /// One of `AC`, `WA`, `FAIL`, `RE`, `TLE`.
    #[serde(rename = "res")]
    pub status: String,
    #[serde(rename = "[sec]", serialize_with = "millis")]
    pub seconds: f64,
    #[serde(rename = "msg")]
    pub message: String,
}

fn millis<S: Serializer>(seconds: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64((seconds * 1000.0).round() / 1000.0)
}

/// Runs `cmd` through `sh -c` with the test input on stdin and judges its stdout.
///
/// A run slower than `time_limit` seconds is `TLE` whatever it printed.
pub fn run_case(
    config: &SuiteConfig,
    cmd: &str,
    test: &str,
    time_limit: f64,
) -> Result<CaseReport> {
    let input_path = config.input_path(test);
    let input = fs::read_to_string(&input_path)
        .with_context(|| format!("No such input: {}", input_path.display()))?;
    let answer_path = config.answer_path(test);
    let answer = fs::read_to_string(&answer_path)
        .with_context(|| format!("No such answer: {}", answer_path.display()))?;

    let stime = Instant::now();
    let output = Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .stdin(Stdio::from(fs::File::open(&input_path)?))
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .output()
        .with_context(|| format!("Failed to execute command: {}", cmd))?;
    let seconds = stime.elapsed().as_secs_f64();

    let (status, message) = if output.status.code() == Some(TIMEOUT_EXIT_CODE)
        || seconds > time_limit
    {
        (
            "TLE".to_string(),
            format!("Time limit exceeded: {:.3}s > {:.3}s", seconds, time_limit),
        )
    } else if !output.status.success() {
        ("RE".to_string(), output.status.to_string())
    } else {
        let verdict = checker::check(&input, &String::from_utf8_lossy(&output.stdout), &answer);
        (verdict.status().to_string(), verdict.to_string())
    };
    eprintln!("!log test {} {} {:.3}", test, status, seconds);
    Ok(CaseReport {
        test: test.to_string(),
        status,
        seconds,
        message,
    })
}

/// Runs `cmd` on every test of the suite, in name order.
pub fn run_all(config: &SuiteConfig, cmd: &str, time_limit: f64) -> Result<Vec<CaseReport>> {
    config
        .list_tests()?
        .iter()
        .map(|test| run_case(config, cmd, test, time_limit))
        .collect()
}

/// Writes the rows as a tab-separated table with a header line.
pub fn write_tsv<W: Write>(rows: &[CaseReport], w: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().delimiter(b'\t').from_writer(w);
    if rows.is_empty() {
        wtr.write_record(["test", "res", "[sec]", "msg"])?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suite() -> Result<(tempfile::TempDir, SuiteConfig)> {
        let dir = tempfile::tempdir()?;
        let config = SuiteConfig::new("radiotorni", dir.path())?;
        fs::write(config.input_path("01a"), "3 1 3\n1 1 1\n1 2\n2 3\n")?;
        fs::write(config.answer_path("01a"), "1\n1 2 1\n")?;
        fs::write(config.input_path("01b"), "3 1 3\n1 2 1\n1 2\n2 3\n")?;
        fs::write(config.answer_path("01b"), "0\n1 2 1\n")?;
        Ok((dir, config))
    }

    #[cfg(unix)]
    #[test]
    fn judges_every_test() -> Result<()> {
        let (_dir, config) = suite()?;
        let rows = run_all(&config, "printf '1\\n1 2 1\\n'", DEFAULT_TIME_LIMIT)?;
        let statuses = rows.iter().map(|r| r.status.as_str()).collect::<Vec<_>>();
        // The fixed output is optimal for 01a and miscounted for 01b.
        assert_eq!(statuses, vec!["AC", "WA"]);
        assert_eq!(rows[0].message, "Correct solution with 1 changes");

        let crashed = run_case(&config, "exit 7", "01a", DEFAULT_TIME_LIMIT)?;
        assert_eq!(crashed.status, "RE");
        let timed_out = run_case(&config, "exit 124", "01a", DEFAULT_TIME_LIMIT)?;
        assert_eq!(timed_out.status, "TLE");

        let echo = run_case(
            &config,
            "cat > /dev/null; echo 0; echo 1 2 1",
            "01b",
            DEFAULT_TIME_LIMIT,
        )?;
        assert_eq!(echo.status, "AC");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn slow_correct_output_is_tle() -> Result<()> {
        let (_dir, config) = suite()?;
        let slow = run_case(&config, "sleep 1; printf '0\\n1 2 1\\n'", "01b", 0.2)?;
        assert_eq!(slow.status, "TLE");
        assert!(slow.seconds > 0.2);
        let fast = run_case(&config, "printf '0\\n1 2 1\\n'", "01b", 10.0)?;
        assert_eq!(fast.status, "AC");
        Ok(())
    }

    #[test]
    fn tsv_layout() -> Result<()> {
        let rows = vec![CaseReport {
            test: "01a".into(),
            status: "WA".into(),
            seconds: 0.5,
            message: "a b".into(),
        }];
        let mut buf = vec![];
        write_tsv(&rows, &mut buf)?;
        assert_eq!(
            String::from_utf8(buf)?,
            "test\tres\t[sec]\tmsg\n01a\tWA\t0.5\ta b\n"
        );
        Ok(())
    }

    #[test]
    fn tsv_quotes_separators() -> Result<()> {
        let rows = vec![CaseReport {
            test: "01\ta".into(),
            status: "AC".into(),
            seconds: 0.1234,
            message: "x\ry\nz".into(),
        }];
        let mut buf = vec![];
        write_tsv(&rows, &mut buf)?;
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_reader(buf.as_slice());
        let records = rdr.records().collect::<Result<Vec<_>, _>>()?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 4);
        assert_eq!(&records[0][0], "01\ta");
        assert_eq!(&records[0][2], "0.123");
        assert_eq!(&records[0][3], "x\ry\nz");
        Ok(())
    }

    #[test]
    fn empty_report_keeps_the_header() -> Result<()> {
        let mut buf = vec![];
        write_tsv(&[], &mut buf)?;
        assert_eq!(String::from_utf8(buf)?, "test\tres\t[sec]\tmsg\n");
        Ok(())
    }

    #[test]
    fn missing_answer_is_an_error() -> Result<()> {
        let (_dir, config) = suite()?;
        fs::remove_file(config.answer_path("01b"))?;
        assert!(run_case(&config, "true", "01b", DEFAULT_TIME_LIMIT).is_err());
        Ok(())
    }
}
