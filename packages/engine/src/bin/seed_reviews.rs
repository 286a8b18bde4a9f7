//! Bulk-load faculty reviews from a structured text file.
//!
//! The file holds `key: value` lines with records separated by `---`:
//!
//! ```text
//! Faculty Name: A. P. Sharma
//! Teaching: 4.5
//! Evaluation: 4
//! Behaviour: 3.5
//! Internals: 4
//! Class Average: High
//! ---
//! ```
//!
//! Records are submitted through the review ledger, never inserted raw, so
//! aggregates stay consistent with the loaded reviews.

use anyhow::{bail, Context, Result};
use clap::Parser;
use engine_core::config::Config;
use engine_core::domains::faculty::models::Faculty;
use engine_core::domains::reviews::models::{ClassAverage, RatingSet};
use engine_core::domains::reviews::submit_review;
use engine_core::kernel::EngineDeps;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "seed_reviews")]
#[command(about = "Bulk-load faculty reviews from a key:value text file")]
struct Cli {
    /// Path to the reviews text file
    #[arg(long)]
    file: PathBuf,

    /// Create faculties that are not in the registry yet
    #[arg(long)]
    create_missing: bool,
}

#[derive(Debug)]
struct SeedRecord {
    faculty_name: String,
    ratings: RatingSet,
    class_average: Option<ClassAverage>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let deps = EngineDeps::from_config(&config).await?;

    let text = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let records = parse_seed_file(&text)?;
    println!("✓ Parsed {} review records", records.len());

    let mut submitted = 0;
    let mut skipped = 0;

    for (idx, record) in records.iter().enumerate() {
        println!(
            "[{}/{}] {}",
            idx + 1,
            records.len(),
            record.faculty_name
        );

        let normalized = Faculty::normalize_name(&record.faculty_name);
        let mut conn = deps.db_pool.acquire().await?;
        let faculty = match Faculty::find_by_normalized_name(&normalized, &mut conn).await? {
            Some(f) => f,
            None if cli.create_missing => {
                let mut tx = deps.db_pool.begin().await?;
                let f = Faculty::insert_new(&record.faculty_name, None, None, &mut tx).await?;
                tx.commit().await?;
                println!("  + Created faculty {}", f.id);
                f
            }
            None => {
                println!("  ⊘ Skipping (unknown faculty; pass --create-missing to add)");
                skipped += 1;
                continue;
            }
        };
        drop(conn);

        submit_review(
            &faculty.id,
            record.ratings,
            record.class_average,
            None,
            &deps,
        )
        .await
        .with_context(|| format!("Failed to submit review for {}", record.faculty_name))?;
        submitted += 1;
    }

    println!("\nDone: {} submitted, {} skipped", submitted, skipped);
    Ok(())
}

/// Parse the `key: value` / `---` seed format. Keys are lowercased with
/// whitespace folded to underscores.
fn parse_seed_file(text: &str) -> Result<Vec<SeedRecord>> {
    let mut records = Vec::new();
    let mut current: HashMap<String, String> = HashMap::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line == "---" {
            if !current.is_empty() {
                records.push(record_from_fields(std::mem::take(&mut current))?);
            }
        } else if let Some((key, value)) = line.split_once(':') {
            let key = key.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join("_");
            current.insert(key, value.trim().to_string());
        }
    }
    if !current.is_empty() {
        records.push(record_from_fields(current)?);
    }

    Ok(records)
}

fn record_from_fields(fields: HashMap<String, String>) -> Result<SeedRecord> {
    let faculty_name = fields
        .get("faculty_name")
        .or_else(|| fields.get("name"))
        .context("record is missing a 'Faculty Name' field")?
        .clone();

    let rating = |key: &str| -> Result<f64> {
        let raw = fields
            .get(key)
            .with_context(|| format!("record for {} is missing '{}'", faculty_name, key))?;
        raw.parse::<f64>()
            .with_context(|| format!("'{}' for {} is not a number: {}", key, faculty_name, raw))
    };

    let ratings = RatingSet {
        teaching: rating("teaching")?,
        evaluation: rating("evaluation")?,
        behaviour: rating("behaviour")?,
        internals: rating("internals")?,
    };
    if ratings.validate().is_err() {
        bail!("record for {} has out-of-range ratings", faculty_name);
    }

    let class_average = match fields.get("class_average").or_else(|| fields.get("average")) {
        Some(raw) => Some(
            raw.parse::<ClassAverage>()
                .with_context(|| format!("bad class average for {}: {}", faculty_name, raw))?,
        ),
        None => None,
    };

    Ok(SeedRecord {
        faculty_name,
        ratings,
        class_average,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Faculty Name: A. P. Sharma
Teaching: 4.5
Evaluation: 4
Behaviour: 3.5
Internals: 4
Class Average: High
---
Faculty Name: J. Roe
Teaching: 2
Evaluation: 2.5
Behaviour: 3
Internals: 2
---
";

    #[test]
    fn parses_multiple_records() {
        let records = parse_seed_file(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].faculty_name, "A. P. Sharma");
        assert_eq!(records[0].ratings.teaching, 4.5);
        assert_eq!(records[0].class_average, Some(ClassAverage::High));
        assert_eq!(records[1].class_average, None);
    }

    #[test]
    fn missing_separator_after_last_record_is_fine() {
        let records = parse_seed_file(SAMPLE.trim_end_matches("---\n")).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn missing_rating_field_is_an_error() {
        let err = parse_seed_file("Faculty Name: X\nTeaching: 4\n---\n").unwrap_err();
        assert!(err.to_string().contains("evaluation"));
    }

    #[test]
    fn out_of_range_rating_is_an_error() {
        let text = "Faculty Name: X\nTeaching: 9\nEvaluation: 4\nBehaviour: 4\nInternals: 4\n";
        assert!(parse_seed_file(text).is_err());
    }
}
