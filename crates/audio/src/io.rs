use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

use beatfind_domain::{ensure_supported, AnalysisError};

/// Decoded audio, downmixed to mono.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioTrack {
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

impl AudioTrack {
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

pub struct AudioDecoder;

impl AudioDecoder {
    /// Decode a whitelisted audio file into mono f32 samples.
    ///
    /// Container and codec handling is delegated to symphonia; undecodable
    /// packets are skipped, any other mid-stream error fails the whole file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<AudioTrack, AnalysisError> {
        let path_ref = path.as_ref();
        ensure_supported(path_ref)?;

        let file = File::open(path_ref).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                AnalysisError::FileNotFound(path_ref.to_path_buf())
            } else {
                AnalysisError::decode(format!("open {:?}: {}", path_ref, err))
            }
        })?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());
        let mut hint = Hint::new();
        if let Some(ext) = path_ref.extension().and_then(|ext| ext.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|err| AnalysisError::decode(format!("probe failed: {err}")))?;
        let mut format = probed.format;
        let track = format
            .default_track()
            .ok_or_else(|| AnalysisError::decode("no default track found"))?;
        let track_id = track.id;
        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|err| AnalysisError::decode(format!("codec setup failed: {err}")))?;
        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| AnalysisError::decode("stream reports no sample rate"))?;

        let mut samples = Vec::new();
        let mut interleaved: Option<SampleBuffer<f32>> = None;

        loop {
            match format.next_packet() {
                Ok(packet) => {
                    if packet.track_id() != track_id {
                        continue;
                    }
                    match decoder.decode(&packet) {
                        Ok(buffer) => {
                            let spec = *buffer.spec();
                            let channels = spec.channels.count();
                            let frames = buffer.frames() as u64;
                            let out = interleaved.get_or_insert_with(|| {
                                SampleBuffer::<f32>::new(frames.max(4096), spec)
                            });
                            if out.capacity() < frames as usize * channels {
                                *out = SampleBuffer::<f32>::new(frames, spec);
                            }
                            out.copy_interleaved_ref(buffer);
                            if channels <= 1 {
                                samples.extend_from_slice(out.samples());
                            } else {
                                let scale = 1.0 / channels as f32;
                                for frame in out.samples().chunks_exact(channels) {
                                    samples.push(frame.iter().sum::<f32>() * scale);
                                }
                            }
                        }
                        Err(symphonia::core::errors::Error::DecodeError(reason)) => {
                            // skip undecodable packet
                            debug!(reason, "skipping undecodable packet");
                        }
                        Err(err) => {
                            return Err(AnalysisError::decode(format!("decode failed: {err}")))
                        }
                    }
                }
                Err(err) => {
                    use symphonia::core::errors::Error as SymphError;
                    match err {
                        SymphError::IoError(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                            break;
                        }
                        SymphError::ResetRequired => break,
                        _ => return Err(AnalysisError::decode(format!("read failed: {err}"))),
                    }
                }
            }
        }

        debug!(
            path = ?path_ref,
            sample_rate,
            sample_count = samples.len(),
            "decoded audio"
        );

        Ok(AudioTrack {
            sample_rate,
            samples,
        })
    }
}
