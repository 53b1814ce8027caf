use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{Record, SurveyDataset};

/// Source column names, in schema order.
const COLUMNS: [&str; 7] = [
    "Gender",
    "PaymentMethod",
    "Chain",
    "Age",
    "Income",
    "PurchaseAmount",
    "FamilySize",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a survey dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the seven survey columns (original format)
/// * `.json`    – `[{ "Gender": "...", "Age": 34, ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<SurveyDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Parse a numeric cell. Blank or non-numeric text becomes `None` (missing)
/// so it can be excluded from aggregates instead of poisoning them.
fn parse_numeric(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<SurveyDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    // All seven survey columns must be present; extra columns are ignored.
    let mut col_idx = [0usize; 7];
    for (slot, name) in col_idx.iter_mut().zip(COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))?;
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |i: usize| row.get(col_idx[i]).unwrap_or("");

        records.push(Record {
            gender: cell(0).to_string(),
            payment_method: cell(1).to_string(),
            chain: cell(2).to_string(),
            age: parse_numeric(cell(3)),
            income: parse_numeric(cell(4)),
            purchase_amount: parse_numeric(cell(5)),
            family_size: parse_numeric(cell(6)),
        });
    }

    Ok(SurveyDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON row. Numeric fields arrive as raw values so that
/// numbers-as-strings and nulls can share the missing-value policy.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Gender", default)]
    gender: String,
    #[serde(rename = "PaymentMethod", default)]
    payment_method: String,
    #[serde(rename = "Chain", default)]
    chain: String,
    #[serde(rename = "Age", default)]
    age: JsonValue,
    #[serde(rename = "Income", default)]
    income: JsonValue,
    #[serde(rename = "PurchaseAmount", default)]
    purchase_amount: JsonValue,
    #[serde(rename = "FamilySize", default)]
    family_size: JsonValue,
}

fn json_numeric(val: &JsonValue) -> Option<f64> {
    match val {
        JsonValue::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        JsonValue::String(s) => parse_numeric(s),
        _ => None,
    }
}

fn load_json(path: &Path) -> Result<SurveyDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let raw: Vec<RawRecord> =
        serde_json::from_str(&text).context("parsing JSON (expected an array of row objects)")?;

    let records = raw
        .into_iter()
        .map(|r| Record {
            gender: r.gender,
            payment_method: r.payment_method,
            chain: r.chain,
            age: json_numeric(&r.age),
            income: json_numeric(&r.income),
            purchase_amount: json_numeric(&r.purchase_amount),
            family_size: json_numeric(&r.family_size),
        })
        .collect();

    Ok(SurveyDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

fn load_parquet(path: &Path) -> Result<SurveyDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut cols: Vec<&Arc<dyn Array>> = Vec::with_capacity(COLUMNS.len());
        for name in COLUMNS {
            let idx = schema
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
            cols.push(batch.column(idx));
        }

        for row in 0..batch.num_rows() {
            records.push(Record {
                gender: extract_string(cols[0], row),
                payment_method: extract_string(cols[1], row),
                chain: extract_string(cols[2], row),
                age: extract_numeric(cols[3], row),
                income: extract_numeric(cols[4], row),
                purchase_amount: extract_numeric(cols[5], row),
                family_size: extract_numeric(cols[6], row),
            });
        }
    }

    Ok(SurveyDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

/// Read a categorical cell; nulls and non-string columns become "".
fn extract_string(col: &Arc<dyn Array>, row: usize) -> String {
    if col.is_null(row) {
        return String::new();
    }
    match col.data_type() {
        DataType::Utf8 => {
            if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
                arr.value(row).to_string()
            } else {
                String::new()
            }
        }
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        _ => String::new(),
    }
}

/// Read a numeric cell from any int/float width; nulls and non-numeric
/// columns become `None`.
fn extract_numeric(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let value = match col.data_type() {
        DataType::Float64 => col.as_any().downcast_ref::<Float64Array>()?.value(row),
        DataType::Float32 => col.as_any().downcast_ref::<Float32Array>()?.value(row) as f64,
        DataType::Int64 => col.as_any().downcast_ref::<Int64Array>()?.value(row) as f64,
        DataType::Int32 => col.as_any().downcast_ref::<Int32Array>()?.value(row) as f64,
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>()?;
            arr.value(row) as u8 as f64
        }
        _ => return None,
    };
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_round_trip_with_missing_numeric() {
        let path = write_temp(
            "survey_dash_loader_test.csv",
            "Gender,PaymentMethod,Chain,Age,Income,PurchaseAmount,FamilySize\n\
             Female,Cash,Kroger,34,52000,45.50,3\n\
             Male,Credit Card,Aldi,not-a-number,61000,,2\n",
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].gender, "Female");
        assert_eq!(ds.records[0].purchase_amount, Some(45.5));
        assert_eq!(ds.records[1].age, None);
        assert_eq!(ds.records[1].purchase_amount, None);
    }

    #[test]
    fn csv_missing_required_column_is_an_error() {
        let path = write_temp(
            "survey_dash_loader_badheader.csv",
            "Gender,Chain,Age,Income,PurchaseAmount,FamilySize\nFemale,Kroger,34,1,2,3\n",
        );
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("PaymentMethod"));
    }

    #[test]
    fn json_numbers_and_numeric_strings_both_parse() {
        let path = write_temp(
            "survey_dash_loader_test.json",
            r#"[
                {"Gender":"Female","PaymentMethod":"Cash","Chain":"Kroger",
                 "Age":34,"Income":"52000","PurchaseAmount":45.5,"FamilySize":null}
            ]"#,
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].income, Some(52000.0));
        assert_eq!(ds.records[0].family_size, None);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("data.xlsx")).unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }
}
