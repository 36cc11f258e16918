use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about = "Write a synthetic EV registration CSV")]
struct Args {
    #[arg(default_value = "sample_ev_data.csv")]
    output: PathBuf,
    #[arg(default_value_t = 3000)]
    rows: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Row layout of the published registration extract (subset of columns).
#[derive(Serialize)]
struct Row<'a> {
    #[serde(rename = "VIN (1-10)")]
    vin: String,
    #[serde(rename = "County")]
    county: &'a str,
    #[serde(rename = "City")]
    city: &'a str,
    #[serde(rename = "State")]
    state: &'a str,
    #[serde(rename = "Model Year")]
    model_year: i32,
    #[serde(rename = "Make")]
    make: &'a str,
    #[serde(rename = "Model")]
    model: &'a str,
    #[serde(rename = "Clean Alternative Fuel Vehicle (CAFV) Eligibility")]
    eligibility: &'a str,
    #[serde(rename = "Electric Range")]
    electric_range: i64,
    #[serde(rename = "Base MSRP")]
    base_msrp: i64,
    #[serde(rename = "Vehicle Location")]
    location: String,
}

/// (city, county, lon, lat)
const CITIES: [(&str, &str, f64, f64); 8] = [
    ("Seattle", "King", -122.3321, 47.6062),
    ("Bellevue", "King", -122.2015, 47.6101),
    ("Redmond", "King", -122.1215, 47.6740),
    ("Kirkland", "King", -122.2087, 47.6815),
    ("Tacoma", "Pierce", -122.4443, 47.2529),
    ("Everett", "Snohomish", -122.2021, 47.9790),
    ("Olympia", "Thurston", -122.9007, 47.0379),
    ("Bremerton", "Kitsap", -122.6326, 47.5673),
];

/// (make, model, electric range, base msrp, first model year)
const MODELS: [(&str, &str, i64, i64, i32); 7] = [
    ("TESLA", "MODEL 3", 220, 0, 2017),
    ("TESLA", "MODEL S", 265, 69900, 2012),
    ("NISSAN", "LEAF", 84, 0, 2011),
    ("CHEVROLET", "BOLT EV", 238, 0, 2017),
    ("BMW", "I3", 153, 44100, 2014),
    ("TOYOTA", "PRIUS PRIME", 25, 0, 2017),
    ("KIA", "NIRO", 239, 0, 2019),
];

const ELIGIBLE: &str = "Clean Alternative Fuel Vehicle Eligible";
const LOW_RANGE: &str = "Not eligible due to low battery range";
const UNKNOWN: &str = "Eligibility unknown as battery range has not been researched";

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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
}

fn vin(rng: &mut SimpleRng) -> String {
    const ALPHABET: &[u8] = b"0123456789ABCDEFGHJKLMNPRSTUVWXYZ";
    (0..10).map(|_| *rng.pick(ALPHABET) as char).collect()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let rows = args.rows;

    let mut rng = SimpleRng::new(args.seed);
    let mut writer = csv::Writer::from_path(&args.output)?;
    let mut without_location = 0usize;

    for _ in 0..rows {
        let &(city, county, lon, lat) = rng.pick(&CITIES);
        let &(make, model, range, msrp, first_year) = rng.pick(&MODELS);
        let model_year = first_year + (rng.next_u64() % (2024 - first_year as u64 + 1)) as i32;

        let eligibility = if range >= 30 {
            ELIGIBLE
        } else if rng.next_f64() < 0.8 {
            LOW_RANGE
        } else {
            UNKNOWN
        };

        // About one row in fifty has no recorded location.
        let location = if rng.next_f64() < 0.02 {
            without_location += 1;
            String::new()
        } else {
            let jitter_lon = (rng.next_f64() - 0.5) * 0.08;
            let jitter_lat = (rng.next_f64() - 0.5) * 0.06;
            format!("POINT ({:.5} {:.5})", lon + jitter_lon, lat + jitter_lat)
        };

        writer.serialize(Row {
            vin: vin(&mut rng),
            county,
            city,
            state: "WA",
            model_year,
            make,
            model,
            eligibility,
            electric_range: range,
            base_msrp: msrp,
            location,
        })?;
    }
    writer.flush()?;

    println!(
        "Wrote {rows} vehicles ({without_location} without location) to {}",
        args.output.display()
    );
    Ok(())
}
