use std::path::Path;

use hound::{SampleFormat, WavSpec};

use crate::{
    audio::AudioBuffer,
    error::{Error, Result},
};

/// Writes `buffer` as 16-bit PCM, clamping samples to [-1, 1].
pub fn write(path: impl AsRef<Path>, buffer: &AudioBuffer) -> Result<()> {
    let path = path.as_ref();
    let wrap = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let spec = WavSpec {
        channels: buffer.channels(),
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).map_err(wrap)?;
    for &x in buffer.samples() {
        writer.write_sample(to_i16(x)).map_err(wrap)?;
    }
    writer.finalize().map_err(wrap)
}

pub fn read(path: impl AsRef<Path>) -> Result<AudioBuffer> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let samples = match spec {
        WavSpec {
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
            ..
        } => reader.samples::<f32>().collect::<hound::Result<Vec<_>>>()?,
        WavSpec {
            bits_per_sample: bits @ 8..=32,
            sample_format: SampleFormat::Int,
            ..
        } => {
            let scale = (1i64 << (bits - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|x| x.map(|x| x as f32 / scale))
                .collect::<hound::Result<Vec<_>>>()?
        }
        _ => return Err(Error::Wav(hound::Error::Unsupported)),
    };
    AudioBuffer::new(samples, spec.sample_rate, spec.channels)
}

fn to_i16(x: f32) -> i16 {
    (x.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn writes_sixteen_bit_pcm() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let buffer = AudioBuffer::new(vec![0.0, 0.5, -0.5, 1.0, 2.0, -3.0], 22050, 2).unwrap();

        write(&path, &buffer).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 22050);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, SampleFormat::Int);
        assert_eq!(reader.len(), 6);

        let loaded = read(&path).unwrap();
        assert_eq!(loaded.frames(), 3);
        let expected = [0.0, 0.5, -0.5, 1.0, 1.0, -1.0];
        for (a, b) in loaded.samples().iter().zip(expected.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-3);
        }
    }

    #[test]
    fn reads_float_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("float.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for x in [0.25f32, -0.75] {
            writer.write_sample(x).unwrap();
        }
        writer.finalize().unwrap();

        let loaded = read(&path).unwrap();
        assert_eq!(loaded.samples(), &[0.25, -0.75]);
        assert_eq!(loaded.sample_rate(), 48000);
    }

    #[test]
    fn write_failure_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.wav");
        let buffer = AudioBuffer::new(vec![0.0; 4], 44100, 1).unwrap();

        let err = write(&path, &buffer).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(err.to_string().contains("out.wav"));
    }
}
