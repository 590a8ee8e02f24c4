//! Generate a deterministic sample sales CSV for trying out the dashboard.

use std::io::Write;

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

fn main() {
    let mut rng = SimpleRng::new(42);

    let regions = ["North", "South", "East", "West"];

    // Per-product mean unit price and units-sold profile.
    let product_profiles: Vec<(&str, f64, f64)> = vec![
        ("Basic", 9.99, 40.0),
        ("Plus", 24.99, 25.0),
        ("Premium", 59.99, 10.0),
    ];

    let output_path = "sample_sales.csv";
    let mut file = std::fs::File::create(output_path).expect("Failed to create output file");
    writeln!(file, "region,product,units,unit_price,revenue").expect("write header");

    let mut rows = 0usize;
    for region in &regions {
        // Regions sell at different volumes.
        let region_factor = 0.8 + 0.15 * regions.iter().position(|r| r == region).unwrap() as f64;

        for &(product, price, base_units) in &product_profiles {
            for _ in 0..10 {
                let units = (rng.gauss(base_units * region_factor, base_units * 0.2))
                    .round()
                    .max(0.0) as i64;
                let unit_price = price * (1.0 + rng.gauss(0.0, 0.03));
                let revenue = units as f64 * unit_price;

                writeln!(
                    file,
                    "{region},{product},{units},{unit_price:.2},{revenue:.2}"
                )
                .expect("write row");
                rows += 1;
            }
        }
    }

    println!("Wrote {rows} rows to {output_path}");
}
