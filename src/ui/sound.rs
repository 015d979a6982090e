/// Sound effects: short procedural tones played through rodio.
///
/// Buffers are rendered to in-memory WAV once at startup; playback is
/// fire-and-forget. Build without the "sound" feature for a silent stub.

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    const SAMPLE_RATE: u32 = 22050;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sfx_miss: Arc<Vec<u8>>,
        sfx_over: Arc<Vec<u8>>,
        sfx_wall: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    tracing::info!("no audio output, running silent: {e}");
                    return None;
                }
            };
            Some(SoundEngine {
                _stream: stream,
                handle,
                sfx_miss: Arc::new(make_wav(&gen_buzz())),
                sfx_over: Arc::new(make_wav(&gen_over())),
                sfx_wall: Arc::new(make_wav(&gen_blip(220.0, 0.015, 0.12))),
            })
        }

        fn play_bytes(&self, bytes: Vec<u8>) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                if let Ok(src) = rodio::Decoder::new(Cursor::new(bytes)) {
                    sink.append(src);
                    sink.detach();
                }
            }
        }

        fn play(&self, buf: &Arc<Vec<u8>>) {
            self.play_bytes(buf.as_ref().clone());
        }

        /// Paddle hit. Pitch climbs with the score so a streak is audible.
        pub fn play_hit(&self, score: i64) {
            self.play_bytes(make_wav(&gen_blip(hit_freq(score), 0.04, 0.25)));
        }

        pub fn play_miss(&self) { self.play(&self.sfx_miss); }
        pub fn play_over(&self) { self.play(&self.sfx_over); }
        pub fn play_wall(&self) { self.play(&self.sfx_wall); }
    }

    fn hit_freq(score: i64) -> f32 {
        440.0 + (score.clamp(0, 200) as f32) * 4.0
    }

    // ════════════════════════════════════════════════════════════
    //  Waveform generators: mono f32 samples
    // ════════════════════════════════════════════════════════════

    fn gen_blip(freq: f32, duration: f32, volume: f32) -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32);
                (t * freq * 2.0 * std::f32::consts::PI).sin() * env * volume
            })
            .collect()
    }

    /// Low square buzz.
    fn gen_buzz() -> Vec<f32> {
        let freq = 110.0_f32;
        let n = (SAMPLE_RATE as f32 * 0.09) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32);
                let wave = if (t * freq).fract() < 0.5 { 1.0 } else { -1.0 };
                wave * env * 0.15
            })
            .collect()
    }

    /// Descending four-note phrase, A4 → C4.
    fn gen_over() -> Vec<f32> {
        let notes = [440.0_f32, 370.0, 311.0, 261.0];
        let mut samples = Vec::new();
        for &freq in &notes {
            let n = (SAMPLE_RATE as f32 * 0.12) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32) * 0.3;
                samples.push((t * freq * 2.0 * std::f32::consts::PI).sin() * env * 0.3);
            }
        }
        let fade_len = samples.len() / 4;
        let total = samples.len();
        for (k, s) in samples[total - fade_len..].iter_mut().enumerate() {
            *s *= (fade_len - k) as f32 / fade_len as f32;
        }
        samples
    }

    // ════════════════════════════════════════════════════════════
    //  16-bit PCM mono WAV
    // ════════════════════════════════════════════════════════════

    fn make_wav(samples: &[f32]) -> Vec<u8> {
        let bits_per_sample: u16 = 16;
        let byte_rate = SAMPLE_RATE * (bits_per_sample as u32) / 8;
        let block_align = bits_per_sample / 8;
        let data_size = samples.len() as u32 * 2;

        let mut buf = Vec::with_capacity(44 + data_size as usize);
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&(36 + data_size).to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
        buf.extend_from_slice(&1u16.to_le_bytes()); // mono
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&byte_rate.to_le_bytes());
        buf.extend_from_slice(&block_align.to_le_bytes());
        buf.extend_from_slice(&bits_per_sample.to_le_bytes());

        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());
        for &s in samples {
            let val = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
            buf.extend_from_slice(&val.to_le_bytes());
        }
        buf
    }

}

// ════════════════════════════════════════════════════════════
//  Public API: no-ops when the sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play_hit(&self, _score: i64) {}
    pub fn play_miss(&self) {}
    pub fn play_over(&self) {}
    pub fn play_wall(&self) {}
}
