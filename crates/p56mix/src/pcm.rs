//! 16-bit PCM buffers: sample conversion and channel layout.

pub use p56mix_asl::common::{PCM16_SCALE, normalize, quantize, to_float, to_pcm16};

/// Bit depth of all PCM buffers handled by the mixer.
pub const BIT_DEPTH: u32 = 16;

/// Deinterleaves a multi-channel buffer into per-channel vectors.
///
/// ```text
/// Interleaved (stereo, 3 frames):
/// [L0, R0, L1, R1, L2, R2]
///
/// Deinterleaved:
/// [[L0, L1, L2],
///  [R0, R1, R2]]
/// ```
///
/// A trailing partial frame is dropped.
pub fn deinterleave(src: &[i16], num_channels: usize) -> Vec<Vec<i16>> {
    if num_channels == 0 {
        return Vec::new();
    }
    let num_frames = src.len() / num_channels;
    let mut dst: Vec<Vec<i16>> = (0..num_channels)
        .map(|_| Vec::with_capacity(num_frames))
        .collect();
    for frame in src.chunks_exact(num_channels) {
        for (ch, &sample) in dst.iter_mut().zip(frame) {
            ch.push(sample);
        }
    }
    dst
}

/// Interleaves equal-length per-channel buffers.
pub fn interleave<C: AsRef<[i16]>>(src: &[C]) -> Vec<i16> {
    let Some(first) = src.first() else {
        return Vec::new();
    };
    let num_frames = first.as_ref().len();
    debug_assert!(src.iter().all(|c| c.as_ref().len() == num_frames));
    let mut dst = Vec::with_capacity(num_frames * src.len());
    for i in 0..num_frames {
        dst.extend(src.iter().map(|c| c.as_ref()[i]));
    }
    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleave_roundtrip() {
        let interleaved = [1, 10, 2, 20, 3, 30];
        let channels = deinterleave(&interleaved, 2);
        assert_eq!(channels, vec![vec![1, 2, 3], vec![10, 20, 30]]);
        assert_eq!(interleave(&channels), interleaved);
    }

    #[test]
    fn deinterleave_drops_partial_frame() {
        let channels = deinterleave(&[1, 2, 3, 4, 5], 2);
        assert_eq!(channels, vec![vec![1, 3], vec![2, 4]]);
        assert!(deinterleave(&[1, 2], 0).is_empty());
        assert!(interleave::<Vec<i16>>(&[]).is_empty());
    }
}
