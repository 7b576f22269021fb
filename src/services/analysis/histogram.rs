use super::types::HistogramBin;

pub const MAX_BINS: usize = 10;

/// Number of bins for a column with `len` values: `min(10, ceil(sqrt(len)))`, at least 1.
pub fn bin_count(len: usize) -> usize {
    ((len as f64).sqrt().ceil() as usize).clamp(1, MAX_BINS)
}

/// Equal-width histogram over `[min, max]` of the values.
///
/// Bin boundaries are synthetic (`min + i * width`), not snapped to data. A column
/// whose values are all identical yields a single bin.
pub fn build_histogram(values: &[f64]) -> Vec<HistogramBin> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![HistogramBin {
            range: range_label(min, max),
            count: values.len(),
        }];
    }

    let bins = bin_count(values.len());
    let mut width = (max - min) / bins as f64;
    if !width.is_finite() {
        // max - min overflowed
        width = max / bins as f64 - min / bins as f64;
    }

    let mut counts = vec![0usize; bins];
    for value in values {
        let mut pos = (value - min) / width;
        if !pos.is_finite() {
            pos = value / width - min / width;
        }
        let idx = pos.floor() as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    let boundary = |i: usize| {
        let b = min + i as f64 * width;
        if b.is_finite() {
            b
        } else {
            let t = i as f64 / bins as f64;
            min * (1.0 - t) + max * t
        }
    };

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            range: range_label(boundary(i), boundary(i + 1)),
            count,
        })
        .collect()
}

fn range_label(start: f64, end: f64) -> String {
    format!("{:.2} - {:.2}", start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bin_count_is_capped() {
        assert_eq!(bin_count(1), 1);
        assert_eq!(bin_count(4), 2);
        assert_eq!(bin_count(5), 3);
        assert_eq!(bin_count(10_000), MAX_BINS);
    }

    #[test]
    fn identical_values_make_one_bin() {
        let bins = build_histogram(&[5.0, 5.0, 5.0]);
        assert_eq!(bins, vec![HistogramBin { range: "5.00 - 5.00".into(), count: 3 }]);
    }

    #[test]
    fn max_lands_in_last_bin() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let bins = build_histogram(&values);
        assert_eq!(bins.len(), 3);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins[0].range, "0.00 - 2.67");
        assert_eq!(bins[2].range, "5.33 - 8.00");
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![3, 3, 3]);
    }

    #[test]
    fn extreme_range_keeps_max_in_last_bin() {
        let bins = build_histogram(&[-1e308, 1e308]);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 1]);
        assert!(bins.iter().all(|b| !b.range.contains("inf")));
        assert!(bins[0].range.ends_with(" - 0.00"));
    }

    #[test]
    fn bins_are_contiguous() {
        let values = [1.5, 2.0, 9.75, 3.25, 7.0, 4.0, 4.5];
        let bins = build_histogram(&values);
        for pair in bins.windows(2) {
            let end = pair[0].range.split(" - ").nth(1).unwrap();
            let start = pair[1].range.split(" - ").next().unwrap();
            assert_eq!(end, start);
        }
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
    }
}
