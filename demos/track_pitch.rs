//! Example: Print the per-frame pitch track of a recording
//!
//! Usage:
//!
//! ```text
//! cargo run --example track_pitch -- <audio.wav | audio.f32> [config.json]
//! ```
//!
//! `.wav` files are read with hound (stereo is mixed down to mono); any other
//! file is treated as raw little-endian f32 mono at the configured sample
//! rate. One JSON object is printed per frame.

use std::path::Path;

use mimic_dsp::features::pitch::track_pitch;
use mimic_dsp::io::decoder::decode_f32_le;
use mimic_dsp::FeatureConfig;

fn load_wav(path: &Path) -> Result<(Vec<f32>, u32), Box<dyn std::error::Error>> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let max_value = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / max_value))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let channels = spec.channels.max(1) as usize;
    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    Ok((mono, spec.sample_rate))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let audio_path = args
        .next()
        .ok_or("usage: track_pitch <audio.wav | audio.f32> [config.json]")?;

    let mut config = match args.next() {
        Some(config_path) => serde_json::from_str(&std::fs::read_to_string(config_path)?)?,
        None => FeatureConfig::default(),
    };

    let path = Path::new(&audio_path);
    let is_wav = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("wav"));

    let samples = if is_wav {
        let (samples, sample_rate) = load_wav(path)?;
        config.sample_rate = sample_rate;
        samples
    } else {
        decode_f32_le(&std::fs::read(path)?)?
    };

    log::info!(
        "Loaded {} samples at {} Hz from {}",
        samples.len(),
        config.sample_rate,
        audio_path
    );

    for row in track_pitch(&samples, &config)? {
        println!("{}", serde_json::to_string(&row)?);
    }

    Ok(())
}
