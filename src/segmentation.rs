//! Profile segmentation into non-overlapping windows.
//!
//! At scale `s` the profile of length `N` holds `Ns = floor(N/s)` whole windows.
//! Forward windows tile the profile from the start; backward windows tile it
//! from the end. When `N` is not a multiple of `s` the two tilings cover
//! different samples, so neither the head nor the tail of the series is
//! discarded. Every scale therefore contributes exactly `2·Ns` windows.

use crate::errors::{MfdfaError, MfdfaResult};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which end of the profile a window is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Tiles from the first sample; indices `1..=Ns`
    Forward,
    /// Tiles from the last sample; indices `Ns+1..=2·Ns`
    Backward,
}

/// One window of the profile at a given scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    /// Window length
    pub scale: usize,
    /// 1-based window index across both directions
    pub index: usize,
    /// Anchoring end
    pub direction: Direction,
    /// Offset of the first sample in the profile
    pub start: usize,
}

impl Segment {
    /// Half-open sample range covered by this window.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.scale
    }
}

/// Expected number of windows at `scale`: `2·floor(length/scale)`.
///
/// Returns 0 for a zero scale.
pub fn window_count(length: usize, scale: usize) -> usize {
    if scale == 0 {
        return 0;
    }
    2 * (length / scale)
}

/// Offset of window `index` in `direction` at `scale`.
///
/// Forward window `v` starts at `(v−1)·s`; backward window `v` starts at
/// `N − (v−Ns)·s`, so the last backward window (`v = Ns+1`) ends exactly on
/// the final sample.
pub fn segment_start(
    length: usize,
    scale: usize,
    index: usize,
    direction: Direction,
) -> MfdfaResult<usize> {
    let per_direction = windows_per_direction(length, scale)?;

    let valid = match direction {
        Direction::Forward => (1..=per_direction).contains(&index),
        Direction::Backward => (per_direction + 1..=2 * per_direction).contains(&index),
    };
    if !valid {
        return Err(MfdfaError::InvalidParameter {
            parameter: "window_index".to_string(),
            value: index as f64,
            constraint: match direction {
                Direction::Forward => format!("[1, {}] for forward windows", per_direction),
                Direction::Backward => format!(
                    "[{}, {}] for backward windows",
                    per_direction + 1,
                    2 * per_direction
                ),
            },
        });
    }

    Ok(match direction {
        Direction::Forward => (index - 1) * scale,
        Direction::Backward => length - (index - per_direction) * scale,
    })
}

/// Borrow window `index` of `profile` at `scale`.
///
/// This is a pure function of its arguments; it captures no state and may be
/// evaluated for any window independently of the others.
///
/// # Example
/// ```rust
/// use mfdfa::segmentation::{segment_window, Direction};
///
/// let profile: Vec<f64> = (0..10).map(|i| i as f64).collect();
/// // Ns = 3 at scale 3: forward windows 1..=3, backward windows 4..=6
/// assert_eq!(segment_window(&profile, 3, 1, Direction::Forward).unwrap(), &[0.0, 1.0, 2.0]);
/// assert_eq!(segment_window(&profile, 3, 4, Direction::Backward).unwrap(), &[7.0, 8.0, 9.0]);
/// ```
pub fn segment_window(
    profile: &[f64],
    scale: usize,
    index: usize,
    direction: Direction,
) -> MfdfaResult<&[f64]> {
    let start = segment_start(profile.len(), scale, index, direction)?;
    Ok(&profile[start..start + scale])
}

/// Fail fast when the number of produced windows diverges from `2·floor(N/s)`.
pub fn verify_window_count(scale: usize, expected: usize, actual: usize) -> MfdfaResult<()> {
    if expected != actual {
        return Err(MfdfaError::SegmentationMismatch {
            scale,
            expected,
            actual,
        });
    }
    Ok(())
}

/// All windows of a profile at one scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segmentation {
    length: usize,
    scale: usize,
    per_direction: usize,
}

impl Segmentation {
    /// Plan the segmentation of a profile of `length` samples at `scale`.
    ///
    /// # Errors
    /// `InvalidScale` if `scale` is zero or longer than the profile.
    pub fn new(length: usize, scale: usize) -> MfdfaResult<Self> {
        let per_direction = windows_per_direction(length, scale)?;
        Ok(Self {
            length,
            scale,
            per_direction,
        })
    }

    /// Window length.
    pub fn scale(&self) -> usize {
        self.scale
    }

    /// `floor(N/s)`, the number of windows in each direction.
    pub fn windows_per_direction(&self) -> usize {
        self.per_direction
    }

    /// `2·floor(N/s)`.
    pub fn expected_count(&self) -> usize {
        2 * self.per_direction
    }

    /// Forward windows in index order, then backward windows in index order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let forward = (1..=self.per_direction).map(move |index| Segment {
            scale: self.scale,
            index,
            direction: Direction::Forward,
            start: (index - 1) * self.scale,
        });
        let backward =
            (self.per_direction + 1..=2 * self.per_direction).map(move |index| Segment {
                scale: self.scale,
                index,
                direction: Direction::Backward,
                start: self.length - (index - self.per_direction) * self.scale,
            });
        forward.chain(backward)
    }
}

fn windows_per_direction(length: usize, scale: usize) -> MfdfaResult<usize> {
    if scale == 0 {
        return Err(MfdfaError::InvalidScale {
            scale,
            length,
            reason: "scale must be at least 1".to_string(),
        });
    }

    let per_direction = length / scale;
    if per_direction == 0 {
        return Err(MfdfaError::InvalidScale {
            scale,
            length,
            reason: "scale exceeds series length, no complete window".to_string(),
        });
    }

    Ok(per_direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_count_formula() {
        assert_eq!(window_count(100, 10), 20);
        assert_eq!(window_count(105, 10), 20);
        assert_eq!(window_count(7, 3), 4);
        assert_eq!(window_count(7, 0), 0);
    }

    #[test]
    fn test_exact_multiple_tilings_coincide() {
        let seg = Segmentation::new(12, 4).unwrap();
        let starts: Vec<usize> = seg.segments().map(|s| s.start).collect();
        // Forward: 0, 4, 8. Backward (v = 4, 5, 6): 8, 4, 0.
        assert_eq!(starts, vec![0, 4, 8, 8, 4, 0]);
    }

    #[test]
    fn test_remainder_covers_head_and_tail() {
        // N = 10, s = 3: forward covers samples 0..9, backward covers 1..10
        let seg = Segmentation::new(10, 3).unwrap();
        let segments: Vec<Segment> = seg.segments().collect();
        assert_eq!(segments.len(), seg.expected_count());
        assert_eq!(segments.len(), 6);

        let forward: Vec<usize> = segments
            .iter()
            .filter(|s| s.direction == Direction::Forward)
            .map(|s| s.start)
            .collect();
        let backward: Vec<usize> = segments
            .iter()
            .filter(|s| s.direction == Direction::Backward)
            .map(|s| s.start)
            .collect();
        assert_eq!(forward, vec![0, 3, 6]);
        assert_eq!(backward, vec![7, 4, 1]);

        assert_eq!(segments[3].range(), 7..10);
        assert!(segments.iter().all(|s| s.range().end <= 10));
    }

    #[test]
    fn test_indices_are_contiguous() {
        let seg = Segmentation::new(50, 7).unwrap();
        let indices: Vec<usize> = seg.segments().map(|s| s.index).collect();
        assert_eq!(indices, (1..=14).collect::<Vec<_>>());
    }

    #[test]
    fn test_segment_window_matches_plan() {
        let profile: Vec<f64> = (0..23).map(|i| i as f64 * 0.5).collect();
        let seg = Segmentation::new(profile.len(), 5).unwrap();
        for segment in seg.segments() {
            let window =
                segment_window(&profile, segment.scale, segment.index, segment.direction).unwrap();
            assert_eq!(window, &profile[segment.range()]);
        }
    }

    #[test]
    fn test_segment_window_rejects_wrong_direction_index() {
        let profile = vec![0.0; 10];
        assert!(matches!(
            segment_window(&profile, 3, 4, Direction::Forward),
            Err(MfdfaError::InvalidParameter { .. })
        ));
        assert!(matches!(
            segment_window(&profile, 3, 3, Direction::Backward),
            Err(MfdfaError::InvalidParameter { .. })
        ));
        assert!(matches!(
            segment_window(&profile, 3, 0, Direction::Forward),
            Err(MfdfaError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_invalid_scales() {
        assert!(matches!(
            Segmentation::new(10, 0),
            Err(MfdfaError::InvalidScale { scale: 0, .. })
        ));
        assert!(matches!(
            Segmentation::new(10, 11),
            Err(MfdfaError::InvalidScale { scale: 11, length: 10, .. })
        ));
    }

    #[test]
    fn test_verify_window_count() {
        assert!(verify_window_count(5, 8, 8).is_ok());
        assert_eq!(
            verify_window_count(5, 8, 7),
            Err(MfdfaError::SegmentationMismatch {
                scale: 5,
                expected: 8,
                actual: 7
            })
        );
    }
}
