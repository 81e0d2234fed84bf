//! Round transcripts as JSON lines.

use anyhow::{Context, Result};
use fair_dice_core::RoundTranscript;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// One JSON object per line
pub fn write_json_lines<W: Write>(mut writer: W, transcripts: &[RoundTranscript]) -> Result<()> {
    for transcript in transcripts {
        serde_json::to_writer(&mut writer, transcript)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn append_to_file(path: &Path, transcripts: &[RoundTranscript]) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening transcript {}", path.display()))?;
    write_json_lines(BufWriter::new(file), transcripts)
}

/// Check every round in a JSON lines stream; returns the verified results
pub fn verify_json_lines<R: BufRead>(reader: R) -> Result<Vec<u64>> {
    let mut results = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let transcript: RoundTranscript = serde_json::from_str(&line)
            .with_context(|| format!("line {}: not a round transcript", number + 1))?;
        let result = transcript
            .verify()
            .with_context(|| format!("line {}: run {}", number + 1, transcript.commit.run_id))?;
        results.push(result);
    }
    Ok(results)
}

pub fn verify_file(path: &Path) -> Result<Vec<u64>> {
    let file =
        File::open(path).with_context(|| format!("opening transcript {}", path.display()))?;
    verify_json_lines(BufReader::new(file))
}
