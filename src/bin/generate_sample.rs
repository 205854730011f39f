use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const HEADERS: [&str; 13] = [
    "Name",
    "Country",
    "State Association",
    "Specialism",
    "Age Group",
    "R/L",
    "C/U/A",
    "Reserve Price Rs Lakh",
    "Age",
    "Test caps",
    "ODI caps",
    "T20 caps",
    "IPL",
];

const COUNTRIES: [(&str, u64); 8] = [
    ("India", 40),
    ("Australia", 10),
    ("England", 10),
    ("South Africa", 8),
    ("New Zealand", 8),
    ("West Indies", 8),
    ("Sri Lanka", 6),
    ("Afghanistan", 4),
];

const STATE_ASSOCIATIONS: [&str; 8] = [
    "Mumbai", "Delhi", "Karnataka", "Tamil Nadu", "Bengal", "Punjab", "Gujarat", "Kerala",
];

const SPECIALISMS: [&str; 4] = ["BATTER", "BOWLER", "ALL-ROUNDER", "WICKETKEEPER"];
const RESERVE_PRICES: [f64; 6] = [20.0, 30.0, 50.0, 75.0, 100.0, 200.0];
const FIRST_NAMES: [&str; 12] = [
    "Arjun", "Rahul", "Sam", "Ben", "Kyle", "Rashid", "Dwayne", "Kusal", "Quinton", "Mitchell",
    "Shai", "Devon",
];
const LAST_NAMES: [&str; 12] = [
    "Sharma", "Patel", "Curran", "Stokes", "Jamieson", "Khan", "Bravo", "Mendis", "Smith",
    "Marsh", "Hope", "Conway",
];

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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n.max(1)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }

    /// Pick by weight from `(item, weight)` pairs.
    fn weighted<'a>(&mut self, items: &'a [(&'a str, u64)]) -> &'a str {
        let total: u64 = items.iter().map(|(_, w)| w).sum();
        let mut roll = self.below(total);
        for &(item, w) in items {
            if roll < w {
                return item;
            }
            roll -= w;
        }
        items[0].0
    }
}

struct Player {
    name: String,
    country: String,
    state_association: String,
    specialism: String,
    age_group: String,
    batting_hand: String,
    capped_status: String,
    reserve_price: f64,
    age: i64,
    test_caps: i64,
    odi_caps: i64,
    t20_caps: i64,
    ipl_caps: i64,
}

fn age_group(age: i64) -> &'static str {
    match age {
        ..=24 => "<25",
        25..=28 => "25-28",
        29..=32 => "29-32",
        _ => ">32",
    }
}

fn generate_players(n: usize, rng: &mut SimpleRng) -> Vec<Player> {
    (0..n)
        .map(|i| {
            let country = rng.weighted(&COUNTRIES).to_string();
            let domestic = country == "India";
            let age = 19 + rng.below(18) as i64;
            let capped = rng.below(100) < (age as u64 - 15) * 4;
            let experience = (age - 18) as u64;

            let (test_caps, odi_caps, t20_caps) = if capped {
                (
                    rng.below(experience * 6) as i64,
                    rng.below(experience * 10) as i64,
                    rng.below(experience * 8) as i64,
                )
            } else {
                (0, 0, 0)
            };
            let ipl_caps = if rng.below(100) < 55 {
                rng.below(experience * 12 + 1) as i64
            } else {
                0
            };

            Player {
                name: format!(
                    "{} {} {i}",
                    rng.pick(&FIRST_NAMES),
                    rng.pick(&LAST_NAMES)
                ),
                state_association: if domestic {
                    rng.pick(&STATE_ASSOCIATIONS).to_string()
                } else {
                    "FOREIGNER".to_string()
                },
                country,
                specialism: rng.pick(&SPECIALISMS).to_string(),
                age_group: age_group(age).to_string(),
                batting_hand: if rng.below(100) < 70 { "RHB" } else { "LHB" }.to_string(),
                capped_status: if capped { "Capped" } else { "Uncapped" }.to_string(),
                reserve_price: if capped {
                    *rng.pick(&RESERVE_PRICES[2..])
                } else {
                    *rng.pick(&RESERVE_PRICES[..3])
                },
                age,
                test_caps,
                odi_caps,
                t20_caps,
                ipl_caps,
            }
        })
        .collect()
}

fn write_csv(path: &Path, players: &[Player]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(HEADERS)?;
    for p in players {
        writer.write_record([
            p.name.clone(),
            p.country.clone(),
            p.state_association.clone(),
            p.specialism.clone(),
            p.age_group.clone(),
            p.batting_hand.clone(),
            p.capped_status.clone(),
            p.reserve_price.to_string(),
            p.age.to_string(),
            p.test_caps.to_string(),
            p.odi_caps.to_string(),
            p.t20_caps.to_string(),
            p.ipl_caps.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, players: &[Player]) -> Result<()> {
    let text = |f: fn(&Player) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(players.iter().map(f).collect::<Vec<_>>()))
    };
    let int = |f: fn(&Player) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(players.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<ArrayRef> = vec![
        text(|p| p.name.as_str()),
        text(|p| p.country.as_str()),
        text(|p| p.state_association.as_str()),
        text(|p| p.specialism.as_str()),
        text(|p| p.age_group.as_str()),
        text(|p| p.batting_hand.as_str()),
        text(|p| p.capped_status.as_str()),
        Arc::new(Float64Array::from(
            players.iter().map(|p| p.reserve_price).collect::<Vec<_>>(),
        )),
        int(|p| p.age),
        int(|p| p.test_caps),
        int(|p| p.odi_caps),
        int(|p| p.t20_caps),
        int(|p| p.ipl_caps),
    ];
    let fields: Vec<Field> = HEADERS
        .iter()
        .zip(&columns)
        .map(|(name, col)| Field::new(*name, col.data_type().clone(), false))
        .collect();

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("auction_sample.csv"));

    let mut rng = SimpleRng::new(42);
    let players = generate_players(120, &mut rng);

    match output_path.extension().and_then(|e| e.to_str()) {
        Some("csv") => write_csv(&output_path, &players)?,
        Some("parquet") | Some("pq") => write_parquet(&output_path, &players)?,
        _ => bail!("output must end in .csv or .parquet"),
    }

    println!(
        "Wrote {} players to {}",
        players.len(),
        output_path.display()
    );
    Ok(())
}
