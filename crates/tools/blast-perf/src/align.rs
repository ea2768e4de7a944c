//! Pointwise alignment of a subject series against a reference series.

use crate::error::DegenerateReferenceError;
use crate::record::{RatioPoint, RatioSeries, RecordSeries};

/// Divide each subject throughput by the reference throughput at the same size.
///
/// Sizes missing from `reference` are dropped: partial overlap between two
/// runs is normal. When `reference` repeats a size, the first occurrence wins.
/// A matched reference throughput of zero is an error rather than an
/// infinite ratio.
pub fn ratio(
    subject: &RecordSeries,
    reference: &RecordSeries,
) -> Result<RatioSeries, DegenerateReferenceError> {
    let mut points = Vec::with_capacity(subject.len().min(reference.len()));

    for point in subject {
        let Some(base) = reference.find(point.size) else {
            continue;
        };
        if base.throughput == 0.0 {
            return Err(DegenerateReferenceError { size: point.size });
        }
        points.push(RatioPoint {
            size: point.size,
            ratio: point.throughput / base.throughput,
        });
    }

    Ok(RatioSeries { points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Measurement;

    fn series(points: &[(u64, f64)]) -> RecordSeries {
        points
            .iter()
            .map(|&(size, throughput)| Measurement { size, throughput })
            .collect()
    }

    #[test]
    fn non_overlapping_sizes_are_dropped() {
        let subject = series(&[(64, 1e9), (128, 2e9)]);
        let reference = series(&[(64, 2e9)]);
        let out = ratio(&subject, &reference).unwrap();
        assert_eq!(out.points, vec![RatioPoint { size: 64, ratio: 0.5 }]);
    }

    #[test]
    fn series_against_itself_is_unity() {
        let s = series(&[(2, 3.0), (4, 7.5), (8, 1e10), (16, 0.25)]);
        let out = ratio(&s, &s).unwrap();
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|p| p.ratio == 1.0));
    }

    #[test]
    fn output_follows_subject_order() {
        let subject = series(&[(32, 3.0), (8, 1.0), (16, 2.0)]);
        let reference = series(&[(8, 2.0), (16, 2.0), (32, 2.0)]);
        let sizes: Vec<u64> = ratio(&subject, &reference)
            .unwrap()
            .iter()
            .map(|p| p.size)
            .collect();
        assert_eq!(sizes, vec![32, 8, 16]);
    }

    #[test]
    fn duplicate_reference_sizes_use_first_match() {
        let subject = series(&[(4, 6.0)]);
        let reference = series(&[(4, 3.0), (4, 2.0)]);
        let out = ratio(&subject, &reference).unwrap();
        assert_eq!(out.points[0].ratio, 2.0);
    }

    #[test]
    fn zero_matched_reference_is_degenerate() {
        let subject = series(&[(4, 1.0), (8, 1.0)]);
        let reference = series(&[(4, 1.0), (8, 0.0)]);
        let err = ratio(&subject, &reference).unwrap_err();
        assert_eq!(err, DegenerateReferenceError { size: 8 });
    }

    #[test]
    fn zero_unmatched_reference_is_ignored() {
        let subject = series(&[(4, 1.0)]);
        let reference = series(&[(4, 2.0), (8, 0.0)]);
        let out = ratio(&subject, &reference).unwrap();
        assert_eq!(out.points, vec![RatioPoint { size: 4, ratio: 0.5 }]);
    }

    #[test]
    fn length_bounded_by_overlap() {
        let subject = series(&[(1, 1.0), (2, 4.0), (3, 9.0), (7, 1.0)]);
        let reference = series(&[(2, 2.0), (3, 3.0), (5, 1.0)]);
        let out = ratio(&subject, &reference).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out.points[0], RatioPoint { size: 2, ratio: 2.0 });
        assert_eq!(out.points[1], RatioPoint { size: 3, ratio: 3.0 });
    }

    #[test]
    fn duplicate_subject_sizes_each_emit() {
        let subject = series(&[(3, 1.0), (3, 2.0)]);
        let reference = series(&[(3, 1.0)]);
        let out = ratio(&subject, &reference).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out.points[1].ratio, 2.0);
    }
}
