/// Summary statistics for one (case, variant) timing sample, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
  pub min: f64,
  pub max: f64,
  pub median: f64,
  pub stddev: f64,
}

impl Summary {
  /// Reduces a timing sample. Standard deviation is the sample (n-1) form,
  /// defined as 0 for samples of fewer than 2 elements.
  pub fn of(samples: &[f64]) -> Self {
    if samples.is_empty() {
      return Self {
        min: 0.0,
        max: 0.0,
        median: 0.0,
        stddev: 0.0,
      };
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];

    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
      (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
      sorted[mid]
    };

    let stddev = if sorted.len() < 2 {
      0.0
    } else {
      let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
      let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (sorted.len() - 1) as f64;
      variance.sqrt()
    };

    Self {
      min,
      max,
      median,
      stddev,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_sample_is_all_zero() {
    let summary = Summary::of(&[]);

    assert_eq!(summary.min, 0.0);
    assert_eq!(summary.max, 0.0);
    assert_eq!(summary.median, 0.0);
    assert_eq!(summary.stddev, 0.0);
  }

  #[test]
  fn single_sample_has_zero_stddev() {
    let summary = Summary::of(&[1.5]);

    assert_eq!(summary.min, 1.5);
    assert_eq!(summary.max, 1.5);
    assert_eq!(summary.median, 1.5);
    assert_eq!(summary.stddev, 0.0);
  }

  #[test]
  fn median_of_even_sample_averages_middle_pair() {
    let summary = Summary::of(&[4.0, 1.0, 3.0, 2.0]);

    assert_eq!(summary.min, 1.0);
    assert_eq!(summary.max, 4.0);
    assert_eq!(summary.median, 2.5);
  }

  #[test]
  fn median_of_odd_sample_is_middle_element() {
    let summary = Summary::of(&[5.0, 1.0, 3.0]);

    assert_eq!(summary.median, 3.0);
  }

  #[test]
  fn stddev_matches_sample_formula() {
    // mean 2.0, variance ((1)^2 + 0 + (1)^2) / 2 = 1.0
    let summary = Summary::of(&[1.0, 2.0, 3.0]);

    assert!((summary.stddev - 1.0).abs() < 1e-12);
  }

  #[test]
  fn min_median_max_are_ordered() {
    let samples = [0.9, 0.4, 2.2, 1.7, 0.4, 3.1, 1.1];
    let summary = Summary::of(&samples);

    assert!(summary.min <= summary.median);
    assert!(summary.median <= summary.max);
  }
}
