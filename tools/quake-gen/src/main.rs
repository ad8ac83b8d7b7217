//! quake-gen: synthetic GeoJSON earthquake catalog generator
//!
//! Usage:
//!   quake-gen <count> [out.geojson]
//!
//! Output is deterministic: the same invocation always writes the same
//! catalog. Two malformed records are appended on purpose so ingestion's
//! drop-and-continue path is visible in demos.

use std::env;
use std::fs;
use std::process;

use serde_json::{json, Value};

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Active regions the generated quakes cluster around.
const EPICENTERS: &[(f64, f64, &str)] = &[
    (61.0, -150.0, "ml"),
    (35.7, -117.5, "ml"),
    (19.4, -155.3, "md"),
    (36.2, 28.0, "mb"),
];

fn generate(count: usize, rng: &mut SimpleRng) -> Value {
    let mut features: Vec<Value> = Vec::with_capacity(count + 2);
    let base_time: i64 = 1_715_000_000_000;

    for i in 0..count {
        let (lat0, lon0, mag_type) = EPICENTERS[i % EPICENTERS.len()];
        let latitude = round4(lat0 + rng.gauss(0.0, 1.5));
        let longitude = round4(lon0 + rng.gauss(0.0, 1.5));
        // Skew low: most quakes are small, a few are strong.
        let magnitude = ((0.5 + rng.next_f64() * 5.5 * rng.next_f64()) * 10.0).round() / 10.0;
        let felt = (magnitude * magnitude * rng.next_f64() * 10.0) as i64;
        let sig = (magnitude * magnitude * 16.0) as i64 + felt / 2;
        let depth = round4(0.5 + rng.next_f64() * 40.0);

        features.push(json!({
            "type": "Feature",
            "properties": {
                "mag": magnitude,
                "time": base_time + (i as i64) * 90_000,
                "felt": felt,
                "sig": sig,
                "magType": mag_type,
                "type": "earthquake"
            },
            "geometry": {
                "type": "Point",
                // quake-engine reads [lat, lon, depth].
                "coordinates": [latitude, longitude, depth]
            },
            "id": format!("gen{:06}", i)
        }));
    }

    // Malformed on purpose: ingestion must drop these and keep the rest.
    features.push(json!({"type": "Feature", "properties": {}, "geometry": {}, "id": "bad-empty"}));
    features.push(json!({
        "type": "Feature",
        "properties": {
            "mag": "strong", "time": base_time, "felt": 1, "sig": 10,
            "magType": "ml", "type": "earthquake"
        },
        "geometry": {"type": "Point", "coordinates": [0, 0, 0]},
        "id": "bad-mag"
    }));

    json!({ "features": features })
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: quake-gen <count> [out.geojson]");
        process::exit(2);
    }
    let count: usize = args[1].parse().unwrap_or_else(|_| {
        eprintln!("quake-gen: count must be an integer, got {}", args[1]);
        process::exit(2);
    });
    let out_path = args.get(2).map(String::as_str).unwrap_or("earthquakes.geojson");

    let mut rng = SimpleRng::new(42);
    let payload = generate(count, &mut rng);
    let text = serde_json::to_string_pretty(&payload).unwrap_or_else(|e| {
        eprintln!("quake-gen: serialize failed: {}", e);
        process::exit(2);
    });
    if let Err(e) = fs::write(out_path, text) {
        eprintln!("quake-gen: cannot write {}: {}", out_path, e);
        process::exit(2);
    }

    println!("Wrote {} events (+2 malformed) to {}", count, out_path);
}
