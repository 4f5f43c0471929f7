//! WAV files and corpus connection through the filesystem.

use std::{env, fs, process};
use std::path::{Path, PathBuf};

use p56mix::connection::{self, ConnectionConfig};
use p56mix::{MixConfig, NoiseMixer, WavError, wav};
use p56mix_proptest::generators;

/// A fresh directory under the system temp dir, removed on drop.
struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new(name: &str) -> Self {
        let path = env::temp_dir().join(format!("p56mix-{name}-{}", process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).unwrap();
        Self(path)
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

#[test]
fn multichannel_file_round_trips() {
    let dir = ScratchDir::new("roundtrip");
    let path = dir.path().join("three.wav");
    let channels = vec![
        generators::sine_pcm16(0.5, 440.0, 16_000, 1000),
        generators::uniform_noise_pcm16(0.2, 1000, 1),
        vec![i16::MIN; 1000],
    ];

    wav::write_pcm16(&path, 16_000, &channels).unwrap();
    let audio = wav::read_pcm16(&path).unwrap();
    assert_eq!(audio.sample_rate_hz, 16_000);
    assert_eq!(audio.channels, channels);

    let (rate, first) = wav::read_mono_pcm16(&path).unwrap();
    assert_eq!(rate, 16_000);
    assert_eq!(first, channels[0]);
}

#[test]
fn unequal_channels_are_not_written() {
    let dir = ScratchDir::new("unequal");
    let err = wav::write_pcm16(dir.path().join("x.wav"), 16_000, &[vec![0i16; 3], vec![0; 2]])
        .unwrap_err();
    assert!(matches!(err, WavError::NoChannels));
    let err = wav::write_pcm16::<Vec<i16>>(dir.path().join("y.wav"), 16_000, &[]).unwrap_err();
    assert!(matches!(err, WavError::NoChannels));
}

#[test]
fn missing_file_is_a_codec_error() {
    let dir = ScratchDir::new("missing");
    let err = wav::read_pcm16(dir.path().join("absent.wav")).unwrap_err();
    assert!(matches!(err, WavError::Hound(_)));
}

#[test]
fn mixed_files_round_trip() {
    let dir = ScratchDir::new("mixed");
    let clean = vec![
        generators::sine_pcm16(0.3, 300.0, 16_000, 16_000),
        generators::sine_pcm16(0.2, 900.0, 16_000, 16_000),
    ];
    let noise = generators::uniform_noise_pcm16(0.4, 17_000, 3);
    wav::write_pcm16(dir.path().join("clean.wav"), 16_000, &clean).unwrap();
    wav::write_pcm16(dir.path().join("noise.wav"), 16_000, &[&noise]).unwrap();

    let clean = wav::read_pcm16(dir.path().join("clean.wav")).unwrap();
    let (_, noise) = wav::read_mono_pcm16(dir.path().join("noise.wav")).unwrap();
    let mut mixer = NoiseMixer::new(MixConfig {
        snr_db: 5.0,
        ..Default::default()
    })
    .unwrap();
    let out = mixer.mix(&clean.channels, &clean.channels, &noise).unwrap();

    let path = dir.path().join("clean_noise.wav");
    wav::write_pcm16(&path, 16_000, &out.clean_noise).unwrap();
    assert_eq!(wav::read_pcm16(&path).unwrap().channels, out.clean_noise);
}

fn write_mono(path: &Path, samples: &[i16]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    wav::write_pcm16(path, 16_000, &[samples]).unwrap();
}

#[test]
fn corpus_is_connected_in_condition_order() {
    let dir = ScratchDir::new("connect");
    let root = dir.path();
    let config = ConnectionConfig {
        root: root.to_owned(),
        categories: vec!["mic_clean".into()],
        channels: vec!["ch0".into(), "ch1".into()],
        snrs: vec!["-5dB".into(), "0dB".into()],
        rts: vec!["200ms".into(), "300ms".into()],
        ..Default::default()
    };

    let ch0 = root.join("mic_clean").join("ch0");
    // Written out of order; the SNR list and file names decide the order.
    write_mono(&ch0.join("0dB").join("200ms").join("a.wav"), &[5, 6]);
    write_mono(&ch0.join("-5dB").join("300ms").join("a.wav"), &[3]);
    write_mono(&ch0.join("-5dB").join("200ms").join("b.wav"), &[2]);
    write_mono(&ch0.join("-5dB").join("200ms").join("a.wav"), &[1]);
    // Not a WAV file.
    fs::write(ch0.join("-5dB").join("200ms").join("notes.txt"), "skip").unwrap();
    // Not a configured condition.
    write_mono(&ch0.join("20dB").join("200ms").join("a.wav"), &[99]);

    let ch1 = root.join("mic_clean").join("ch1");
    write_mono(&ch1.join("0dB").join("300ms").join("z.wav"), &[-7]);

    let jobs = connection::plan(&config).unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].inputs.len(), 4);
    assert_eq!(jobs[1].inputs.len(), 1);

    let written = connection::run(&config).unwrap();
    assert_eq!(
        written,
        vec![
            root.join("mic_clean").join("mic_clean_ch0_4snr_7rt.wav"),
            root.join("mic_clean").join("mic_clean_ch1_4snr_7rt.wav"),
        ]
    );
    let (_, ch0_out) = wav::read_mono_pcm16(&written[0]).unwrap();
    assert_eq!(ch0_out, vec![1, 2, 3, 5, 6]);
    // Each stream holds only its own channel's segments.
    let (_, ch1_out) = wav::read_mono_pcm16(&written[1]).unwrap();
    assert_eq!(ch1_out, vec![-7]);
}

#[test]
fn unreadable_segment_names_its_path() {
    let dir = ScratchDir::new("connect-bad");
    let root = dir.path();
    let bad = root
        .join("mic_noise")
        .join("ch0")
        .join("0dB")
        .join("200ms")
        .join("bad.wav");
    fs::create_dir_all(bad.parent().unwrap()).unwrap();
    fs::write(&bad, b"not audio").unwrap();

    let config = ConnectionConfig {
        root: root.to_owned(),
        categories: vec!["mic_noise".into()],
        channels: vec!["ch0".into()],
        ..Default::default()
    };
    match connection::run(&config).unwrap_err() {
        connection::ConnectionError::Wav { path, .. } => assert_eq!(path, bad),
        other => panic!("unexpected error: {other}"),
    }
}
