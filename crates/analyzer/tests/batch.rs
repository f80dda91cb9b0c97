use std::path::{Path, PathBuf};

use tempfile::TempDir;

use beatfind_analyzer::{analyze_file, BatchAnalyzer, BatchProgress};
use beatfind_domain::TempoParams;

/// Minimal mono 16-bit PCM WAV writer for fixtures.
fn write_wav(path: &Path, sample_rate: u32, samples: &[f32]) {
    let byte_len = (samples.len() * 2) as u32;
    let mut data = Vec::with_capacity(44 + samples.len() * 2);
    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&(36 + byte_len).to_le_bytes());
    data.extend_from_slice(b"WAVEfmt ");
    data.extend_from_slice(&16u32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes()); // PCM
    data.extend_from_slice(&1u16.to_le_bytes()); // mono
    data.extend_from_slice(&sample_rate.to_le_bytes());
    data.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    data.extend_from_slice(&2u16.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes());
    data.extend_from_slice(b"data");
    data.extend_from_slice(&byte_len.to_le_bytes());
    for sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        data.extend_from_slice(&value.to_le_bytes());
    }
    std::fs::write(path, data).unwrap();
}

/// Click track: impulses every `interval` samples.
fn click_samples(sample_rate: u32, interval: usize, seconds: u32) -> Vec<f32> {
    let total = (sample_rate * seconds) as usize;
    let mut samples = vec![0.0f32; total];
    for i in (0..total).step_by(interval) {
        samples[i] = 0.9;
    }
    samples
}

fn click_wav(dir: &TempDir, name: &str) -> PathBuf {
    // 120 BPM: impulses every 11025 samples at 22.05 kHz.
    let path = dir.path().join(name);
    write_wav(&path, 22_050, &click_samples(22_050, 11_025, 4));
    path
}

#[tokio::test(flavor = "multi_thread")]
async fn batch_matches_single_file_api() {
    let dir = TempDir::new().unwrap();
    let path = click_wav(&dir, "click.wav");
    let params = TempoParams::default();

    let single = analyze_file(path.clone(), params).await.unwrap();
    assert!(
        (single - 120.0).abs() < 10.0,
        "expected roughly 120 BPM, got {single}"
    );

    let analyzer = BatchAnalyzer::new(params).unwrap();
    let results = analyzer.run(std::slice::from_ref(&path), |_| {}).await;
    assert_eq!(results.get(&path).copied(), Some(single));
}

#[tokio::test(flavor = "multi_thread")]
async fn aggregate_contains_only_successes() {
    let dir = TempDir::new().unwrap();
    let good: Vec<PathBuf> = (0..3).map(|i| click_wav(&dir, &format!("ok-{i}.wav"))).collect();
    let mut files = good.clone();
    files.push(dir.path().join("missing-1.wav"));
    files.push(dir.path().join("missing-2.wav"));

    let analyzer = BatchAnalyzer::new(TempoParams::default()).unwrap();
    let mut seen: Vec<BatchProgress> = Vec::new();
    let results = analyzer.run(&files, |p| seen.push(p)).await;

    assert_eq!(results.len(), 3);
    for path in &good {
        assert!(results.contains_key(path));
    }

    // Progress is strictly increasing and ends at (N, N) exactly once.
    assert_eq!(seen.len(), 5);
    for (i, progress) in seen.iter().enumerate() {
        assert_eq!(progress.processed, i + 1);
        assert_eq!(progress.total, 5);
    }
    assert_eq!(
        seen.iter().filter(|p| p.processed == p.total).count(),
        1
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn large_batch_is_consistent_with_single_file_results() {
    let dir = TempDir::new().unwrap();
    let params = TempoParams::default();
    let files: Vec<PathBuf> = (0..50)
        .map(|i| click_wav(&dir, &format!("track-{i:02}.wav")))
        .collect();

    let reference = analyze_file(files[0].clone(), params).await.unwrap();

    let analyzer = BatchAnalyzer::new(params).unwrap().with_concurrency(8);
    let results = analyzer.run(&files, |_| {}).await;

    assert_eq!(results.len(), 50);
    for path in &files {
        assert_eq!(results.get(path).copied(), Some(reference));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn non_whitelisted_files_are_counted_but_omitted() {
    let dir = TempDir::new().unwrap();
    let wav = click_wav(&dir, "real.wav");
    let text = dir.path().join("notes.txt");
    std::fs::write(&text, b"not audio").unwrap();

    let analyzer = BatchAnalyzer::new(TempoParams::default()).unwrap();
    let files = vec![wav.clone(), text];
    let mut last = None;
    let results = analyzer.run(&files, |p| last = Some(p)).await;

    assert_eq!(results.len(), 1);
    assert!(results.contains_key(&wav));
    assert_eq!(
        last,
        Some(BatchProgress {
            processed: 2,
            total: 2
        })
    );
}
