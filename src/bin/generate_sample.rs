use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::info;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::Serialize;

const INTERCEPT: f64 = 1.0;
const SLOPE: f64 = 2.0;
const NOISE_SD: f64 = 1.0;

#[derive(Debug, Serialize)]
struct Record {
    id: i64,
    x: f64,
    y: f64,
    group: String,
}

/// Known linear relationship plus Gaussian noise: `y = 1 + 2x + e`.
fn generate(rows: usize, seed: u64) -> Result<Vec<Record>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, NOISE_SD).context("building noise distribution")?;
    let groups = ["a", "b", "c"];

    Ok((0..rows)
        .map(|i| {
            let x: f64 = rng.random_range(0.0..10.0);
            Record {
                id: i as i64 + 1,
                x,
                y: INTERCEPT + SLOPE * x + noise.sample(&mut rng),
                group: groups[i % groups.len()].to_string(),
            }
        })
        .collect())
}

fn write_csv(path: &Path, records: &[Record]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for record in records {
        writer.serialize(record).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, records: &[Record]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("x", DataType::Float64, false),
        Field::new("y", DataType::Float64, false),
        Field::new("group", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(records.iter().map(|r| r.id))),
            Arc::new(Float64Array::from_iter_values(records.iter().map(|r| r.x))),
            Arc::new(Float64Array::from_iter_values(records.iter().map(|r| r.y))),
            Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.group.as_str()))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let output_path = PathBuf::from(args.next().unwrap_or_else(|| "sample_data.csv".into()));
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("'{n}' is not a row count"))?,
        None => 100,
    };

    let records = generate(rows, 42)?;
    let is_parquet = output_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        write_parquet(&output_path, &records)?;
    } else {
        write_csv(&output_path, &records)?;
    }

    info!("y = {INTERCEPT} + {SLOPE}x + N(0, {NOISE_SD}²)");
    println!("Wrote {rows} rows to {}", output_path.display());
    Ok(())
}
