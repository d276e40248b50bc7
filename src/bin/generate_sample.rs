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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Render a whole number of GB the way inventory exports do, with
/// thousands separators: 2048 → "2,048".
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let owners = ["alice", "bob", "carol", "dave", "erin"];
    let purposes = ["webserver", "db", "ci", "cache", "monitoring"];
    let suffixes = ["01", "02", "prod", "staging", "x"];
    let states = ["powered-on", "powered-on", "powered-on", "powered-off", "suspended"];
    let memory_gb = [4u64, 8, 16, 32, 64];
    let storage_gb = [128u64, 256, 512, 1024, 2048, 4096];

    let output_path = "sample_inventory.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["name", "power-state", "memory-size", "provisioned-storage"])
        .expect("Failed to write header");

    let rows = 60;
    for i in 0..rows {
        // Every tenth machine has a bare name, so the undefined-purpose
        // group shows up in aggregations.
        let name = if i % 10 == 9 {
            format!("legacy{i}")
        } else {
            format!(
                "{}-{}-{}",
                rng.pick(&owners),
                rng.pick(&purposes),
                rng.pick(&suffixes)
            )
        };
        let state = *rng.pick(&states);
        let memory = format!("{} GB", rng.pick(&memory_gb));

        // Mix units: larger volumes show up as whole TB in the export.
        let gb = *rng.pick(&storage_gb);
        let storage = if gb >= 1024 && i % 3 == 0 {
            format!("{} TB", gb / 1024)
        } else {
            format!("{} GB", group_thousands(gb))
        };

        writer
            .write_record([name.as_str(), state, memory.as_str(), storage.as_str()])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {rows} machines to {output_path}");
}
