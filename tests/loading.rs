use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

use resample_cv::config::ReportConfig;
use resample_cv::data::loader::load_file;
use resample_cv::data::Value;
use resample_cv::report::Report;

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn loads_csv_and_tsv() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let csv = write(&dir, "cars.csv", "speed,dist,site\n4,2,a\n7,4,b\n8,16,a\n");
    let tsv = write(&dir, "cars.tsv", "speed\tdist\n4\t2\n7\t4\n");

    let ds = load_file(&csv).expect("load csv");
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.numeric_column("dist").expect("numeric"), vec![2.0, 4.0, 16.0]);
    assert_eq!(ds.value(1, "site"), Some(&Value::String("b".into())));

    let ds = load_file(&tsv).expect("load tsv");
    assert_eq!(ds.column_names(), &["speed", "dist"]);
}

#[test]
fn loads_json_records() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = write(
        &dir,
        "rows.json",
        r#"[{"x": 1, "y": 2.5, "g": "a"}, {"x": 2, "y": null, "g": "b"}]"#,
    );
    let ds = load_file(&path).expect("load json");
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.value(0, "x"), Some(&Value::Integer(1)));
    assert_eq!(ds.value(1, "y"), Some(&Value::Null));
}

#[test]
fn loads_flat_parquet() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = dir.path().join("rows.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("x", DataType::Float64, false),
        Field::new("group", DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Float64Array::from(vec![0.5, 1.5])),
            Arc::new(StringArray::from(vec!["a", "b"])),
        ],
    )
    .expect("record batch");
    let file = std::fs::File::create(&path).expect("create parquet");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("writer");
    writer.write(&batch).expect("write batch");
    writer.close().expect("close writer");

    let ds = load_file(&path).expect("load parquet");
    assert_eq!(ds.column_names(), &["x", "group"]);
    assert_eq!(ds.numeric_column("x").expect("numeric"), vec![0.5, 1.5]);
    assert_eq!(ds.value(1, "group"), Some(&Value::String("b".into())));
}

#[test]
fn unsupported_extension_is_an_error() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = write(&dir, "rows.xlsx", "");
    assert!(load_file(&path).is_err());
}

#[test]
fn report_runs_from_files() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let mut csv = String::from("x,y\n");
    for i in 0..30 {
        let x = i as f64;
        csv.push_str(&format!("{x},{}\n", 3.0 * x - 2.0 + if i % 3 == 0 { 0.5 } else { -0.25 }));
    }
    let data = write(&dir, "line.csv", &csv);
    let config = write(
        &dir,
        "config.json",
        r#"{"splits": 5, "holdout": 6, "candidates": [{"name": "lm", "kind": "linear"}]}"#,
    );

    let config = ReportConfig::from_path(&config).expect("config");
    let dataset = load_file(&data).expect("load csv");
    let report = Report::run(Arc::new(dataset), &config).expect("report");
    assert_eq!(report.splits, 5);
    assert_eq!(report.comparisons[0].scores.len(), 5);
    assert!(report.to_string().contains("lm"));
}
