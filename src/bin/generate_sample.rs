use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct Row {
    gender: String,
    payment: String,
    chain: String,
    age: i64,
    income: f64,
    purchase: Option<f64>,
    family_size: i64,
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let genders = ["Female", "Male"];
    let payments = ["Cash", "Credit Card", "Debit Card"];
    // Per-chain purchase profile: (name, mean, std dev)
    let chains = [
        ("Walmart", 55.0, 18.0),
        ("Kroger", 48.0, 14.0),
        ("Costco", 120.0, 35.0),
        ("Aldi", 32.0, 10.0),
    ];

    let n_rows = 400;
    let mut rows: Vec<Row> = Vec::with_capacity(n_rows);

    for _ in 0..n_rows {
        let &(chain, mean, std_dev) = rng.pick(&chains);

        let mut purchase = rng.gauss(mean, std_dev).max(1.0);
        // Inject the occasional big-basket outlier so the box plot has
        // points beyond the whiskers.
        if rng.next_f64() < 0.03 {
            purchase *= 4.0;
        }
        // A few surveys came back with the amount left blank.
        let purchase = (rng.next_f64() >= 0.02).then_some(purchase);

        rows.push(Row {
            gender: rng.pick(&genders).to_string(),
            payment: rng.pick(&payments).to_string(),
            chain: chain.to_string(),
            age: 18 + (rng.next_u64() % 60) as i64,
            income: (rng.gauss(58_000.0, 16_000.0).max(12_000.0) / 100.0).round() * 100.0,
            purchase,
            family_size: 1 + (rng.next_u64() % 6) as i64,
        });
    }

    write_csv(&rows, "sample_survey.csv");
    write_parquet(&rows, "sample_survey.parquet");
    println!("Wrote {} survey rows to sample_survey.{{csv,parquet}}", rows.len());
}

fn write_csv(rows: &[Row], path: &str) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    writer
        .write_record([
            "Gender",
            "PaymentMethod",
            "Chain",
            "Age",
            "Income",
            "PurchaseAmount",
            "FamilySize",
        ])
        .expect("Failed to write CSV header");

    for row in rows {
        let purchase = row
            .purchase
            .map(|v| format!("{v:.2}"))
            .unwrap_or_default();
        writer
            .write_record([
                row.gender.clone(),
                row.payment.clone(),
                row.chain.clone(),
                row.age.to_string(),
                format!("{:.0}", row.income),
                purchase,
                row.family_size.to_string(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");
}

fn write_parquet(rows: &[Row], path: &str) {
    let gender_array = StringArray::from(rows.iter().map(|r| r.gender.as_str()).collect::<Vec<_>>());
    let payment_array =
        StringArray::from(rows.iter().map(|r| r.payment.as_str()).collect::<Vec<_>>());
    let chain_array = StringArray::from(rows.iter().map(|r| r.chain.as_str()).collect::<Vec<_>>());
    let age_array = Int64Array::from(rows.iter().map(|r| r.age).collect::<Vec<_>>());
    let income_array = Float64Array::from(rows.iter().map(|r| r.income).collect::<Vec<_>>());
    let purchase_array = Float64Array::from(rows.iter().map(|r| r.purchase).collect::<Vec<_>>());
    let family_array = Int64Array::from(rows.iter().map(|r| r.family_size).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("Gender", DataType::Utf8, false),
        Field::new("PaymentMethod", DataType::Utf8, false),
        Field::new("Chain", DataType::Utf8, false),
        Field::new("Age", DataType::Int64, false),
        Field::new("Income", DataType::Float64, false),
        Field::new("PurchaseAmount", DataType::Float64, true),
        Field::new("FamilySize", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(gender_array),
            Arc::new(payment_array),
            Arc::new(chain_array),
            Arc::new(age_array),
            Arc::new(income_array),
            Arc::new(purchase_array),
            Arc::new(family_array),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}
