//! Benchmark utilities.

use cellkey_core::{AnyCell, CellBuilder, CellType};
use rand::Rng;

/// Generate random key bytes of the specified size.
pub fn random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

/// Generate a catalog row key with random descriptor and region id.
pub fn random_catalog_row(table: &str) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let descriptor: u32 = rng.gen();
    let region_id: u64 = rng.gen();
    format!("{table},region{descriptor},{region_id}.abc.").into_bytes()
}

/// Generate `count` cells spread over a few hundred rows, alternating
/// array and buffer backings.
pub fn generate_cells(count: usize, row_size: usize) -> Vec<AnyCell> {
    let mut rng = rand::thread_rng();
    let rows: Vec<Vec<u8>> = (0..256).map(|_| random_data(row_size)).collect();

    (0..count)
        .map(|i| {
            let builder = CellBuilder::new(&rows[rng.gen_range(0..rows.len())])
                .family("cf")
                .qualifier(format!("q{}", rng.gen_range(0..16)))
                .value(random_data(32))
                .timestamp(rng.gen_range(0..1_000))
                .cell_type(if rng.gen_bool(0.1) {
                    CellType::Delete
                } else {
                    CellType::Put
                })
                .sequence_id(i as i64);
            if i % 2 == 0 {
                AnyCell::from(builder.build_array().expect("row within key limits"))
            } else {
                AnyCell::from(builder.build_buffer().expect("row within key limits"))
            }
        })
        .collect()
}
