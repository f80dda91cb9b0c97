use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use beatfind_analyzer::BatchAnalyzer;
use beatfind_domain::TempoParams;

#[derive(Parser, Debug)]
#[command(author, version, about = "Estimate the tempo of audio files", long_about = None)]
struct Cli {
    /// Audio files to analyze (wav, aiff, flac, ogg, mp3)
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Samples advanced between analysis frames
    #[arg(long, default_value_t = 512)]
    hop_length: usize,
    /// Samples per analysis frame
    #[arg(long, default_value_t = 2048)]
    frame_length: usize,
    /// Center of the tempo prior in BPM
    #[arg(long, default_value_t = 120.0)]
    start_bpm: f32,
    /// Prior standard deviation in octaves
    #[arg(long, default_value_t = 1.0)]
    std_bpm: f32,
    /// Autocorrelation window in seconds
    #[arg(long, default_value_t = 8.0)]
    ac_size: f32,
    /// Maximum tempo cutoff in BPM; pass 0 to disable
    #[arg(long, default_value_t = 320.0)]
    max_tempo: f32,
    /// Number of concurrent analysis workers (defaults to the CPU count)
    #[arg(short, long)]
    jobs: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let params = TempoParams {
        hop_length: cli.hop_length,
        frame_length: cli.frame_length,
        start_bpm: cli.start_bpm,
        std_bpm: cli.std_bpm,
        ac_size: cli.ac_size,
        max_tempo: (cli.max_tempo > 0.0).then_some(cli.max_tempo),
    };

    let mut analyzer = BatchAnalyzer::new(params)?;
    if let Some(jobs) = cli.jobs {
        analyzer = analyzer.with_concurrency(jobs);
    }

    let results = analyzer
        .run(&cli.files, |p| {
            info!(processed = p.processed, total = p.total, "progress");
        })
        .await;

    let printable: BTreeMap<String, f32> = results
        .iter()
        .map(|(path, bpm)| (path.display().to_string(), *bpm))
        .collect();
    println!("{}", serde_json::to_string_pretty(&printable)?);
    Ok(())
}
