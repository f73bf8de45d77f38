use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop a dump before its output file is complete.
#[derive(Debug, Error)]
pub enum Error {
    #[error("input file '{}' does not exist", .0.display())]
    InputNotFound(PathBuf),

    #[error("input path '{}' is not a file", .0.display())]
    InputNotAFile(PathBuf),

    #[error("cannot read input file '{}': {source}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ffmpeg executable '{0}' not found; install ffmpeg or point --ffmpeg at it")]
    FfmpegNotFound(String),

    /// ffmpeg ran but failed; carries its stderr untouched.
    #[error("ffmpeg error: {0}")]
    Decode(String),

    #[error("transpose of {0} semitones has no finite pitch ratio")]
    TransposeOutOfRange(i32),

    #[error("invalid audio buffer: {0}")]
    InvalidBuffer(String),

    #[error("output path '{}' is a directory", .0.display())]
    OutputIsADirectory(PathBuf),

    #[error("output file '{}' is the input file", .0.display())]
    OutputIsInput(PathBuf),

    #[error("aborted: output file '{}' exists and overwrite not confirmed", .0.display())]
    Declined(PathBuf),

    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InputNotFound(PathBuf::from("missing.mp4"));
        assert_eq!(err.to_string(), "input file 'missing.mp4' does not exist");

        let err = Error::Decode("Invalid data found when processing input".into());
        assert_eq!(
            err.to_string(),
            "ffmpeg error: Invalid data found when processing input"
        );

        let err = Error::TransposeOutOfRange(i32::MAX);
        assert_eq!(
            err.to_string(),
            "transpose of 2147483647 semitones has no finite pitch ratio"
        );
    }

    #[test]
    fn test_declined_names_output() {
        let err = Error::Declined(PathBuf::from("song.wav"));
        assert_eq!(
            err.to_string(),
            "aborted: output file 'song.wav' exists and overwrite not confirmed"
        );
    }
}
