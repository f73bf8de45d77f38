#![allow(dead_code)]

use std::{cell::Cell, io, path::Path};

use audiodumper::{AudioBuffer, Confirm, Decode, Error, Result};

pub const RATE: u32 = 44100;

pub fn tone(freq: f32, seconds: f32) -> AudioBuffer {
    let frames = (RATE as f32 * seconds) as usize;
    let left: Vec<f32> = (0..frames)
        .map(|i| (std::f32::consts::TAU * freq * i as f32 / RATE as f32).sin() * 0.5)
        .collect();
    let right = left.iter().map(|x| x * 0.5).collect();
    AudioBuffer::from_channels(vec![left, right], RATE).unwrap()
}

/// Stands in for ffmpeg: every input decodes to the same stereo tone.
pub struct ToneDecoder {
    pub seconds: f32,
    pub calls: Cell<usize>,
}

impl ToneDecoder {
    pub fn new(seconds: f32) -> Self {
        Self {
            seconds,
            calls: Cell::new(0),
        }
    }
}

impl Decode for ToneDecoder {
    fn decode(&self, _path: &Path) -> Result<AudioBuffer> {
        self.calls.set(self.calls.get() + 1);
        Ok(tone(440.0, self.seconds))
    }
}

pub struct BrokenDecoder;

impl Decode for BrokenDecoder {
    fn decode(&self, path: &Path) -> Result<AudioBuffer> {
        Err(Error::Decode(format!(
            "{}: Invalid data found when processing input",
            path.display()
        )))
    }
}

/// Answers every prompt the same way and remembers what was asked.
pub struct Answer {
    pub yes: bool,
    pub asked: Vec<String>,
}

impl Answer {
    pub fn new(yes: bool) -> Self {
        Self {
            yes,
            asked: Vec::new(),
        }
    }
}

impl Confirm for Answer {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        self.asked.push(prompt.to_string());
        Ok(self.yes)
    }
}

pub struct NeverAsked;

impl Confirm for NeverAsked {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        panic!("unexpected prompt: {prompt}");
    }
}

pub fn fake_media(dir: &Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"\x00\x00\x00\x18ftypmp42").unwrap();
    path
}
