//! Write a few records through one view and read them back through another
//!
//! Run with `RUST_LOG=mapview=trace` to see the mapping lifecycle.

use mapview::{AccessMode, MapOptions, OpenMode};
use tracing_subscriber::EnvFilter;

fn main() -> mapview::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dir = std::env::temp_dir().join("mapview-roundtrip");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("samples.bin");

    let mut file = MapOptions::new()
        .with_open_mode(OpenMode::Create)
        .with_map_name("samples")
        .open(&path)?;
    println!(
        "Mapped '{}' with capacity {} bytes",
        path.display(),
        file.capacity()
    );

    let samples: Vec<f64> = (0..64).map(|i| (i as f64).sqrt()).collect();
    {
        let mut writer = file.create_view(0, 0, AccessMode::Write)?;
        writer.write_from(0, &samples, 0, samples.len())?;
        writer.flush()?;
    }

    // Read the second half through a window that starts mid-file
    let half = (samples.len() / 2) as u64 * 8;
    let reader = file.create_view(half, 0, AccessMode::Read)?;
    let count = samples.len() / 2;
    let mut tail = vec![0f64; count];
    reader.read_into(0, &mut tail, 0, count)?;
    println!("View at offset {} holds {} bytes", reader.offset(), reader.capacity());
    println!("First values of the second half: {:?}", &tail[..4]);
    assert_eq!(&tail[..], &samples[samples.len() / 2..]);

    file.dispose();
    println!("Views still holding the mapping: {}", file.live_views());

    let err = file.create_view(0, 0, AccessMode::Read).unwrap_err();
    println!("After dispose: {err}");
    Ok(())
}
