//! Writes synthetic tensile-test CSVs (`sample_<specimen>.csv`) in the
//! two-row header layout the viewer reads.

use std::path::Path;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

/// Elastic up to the yield point, then a smooth knee into slight hardening.
fn stress_at(strain: f64, modulus: f64, yield_stress: f64) -> f64 {
    let yield_strain = yield_stress / modulus;
    if strain <= yield_strain {
        modulus * strain
    } else {
        let plastic = strain - yield_strain;
        yield_stress + 0.05 * modulus * plastic * (-plastic / 0.01).exp()
            + 0.02 * modulus * plastic
    }
}

fn write_specimen<R: Rng>(
    path: &Path,
    modulus: f64,
    yield_stress: f64,
    max_strain_pct: f64,
    n_points: usize,
    noise: &Normal<f64>,
    rng: &mut R,
) -> csv::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Time", "Extension", "Tensile strain", "Tensile stress"])?;
    writer.write_record(["s", "mm", "%", "MPa"])?;

    for i in 0..n_points {
        let strain_pct = max_strain_pct * i as f64 / (n_points - 1) as f64;
        let stress = stress_at(strain_pct / 100.0, modulus, yield_stress) + noise.sample(rng);
        writer.write_record([
            format!("{:.2}", i as f64 * 0.1),
            format!("{:.4}", strain_pct * 0.5),
            format!("{strain_pct:.5}"),
            format!("{stress:.4}"),
        ])?;
    }
    // Trailing blank-ish row, as exported by some test machines.
    writer.write_record(["", "", "", ""])?;
    writer.flush()?;
    Ok(())
}

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let noise = Normal::new(0.0, 0.4).expect("valid noise distribution");

    // (specimen, modulus MPa, yield MPa, max strain %, points)
    let specimens = [
        ("PLA_1", 2300.0, 48.0, 5.0, 400),
        ("PLA_2", 2250.0, 46.0, 6.0, 520),
        ("PLA_3", 2380.0, 50.0, 4.5, 310),
        ("PETG_1", 1900.0, 40.0, 8.0, 700),
        ("PETG_2", 1850.0, 38.0, 7.0, 610),
    ];

    for &(name, modulus, yield_stress, max_strain_pct, n_points) in &specimens {
        let path = format!("sample_{name}.csv");
        write_specimen(
            Path::new(&path),
            modulus,
            yield_stress,
            max_strain_pct,
            n_points,
            &noise,
            &mut rng,
        )
        .expect("Failed to write sample CSV");
        println!("Wrote {n_points} rows (E = {modulus} MPa) to {path}");
    }
}
