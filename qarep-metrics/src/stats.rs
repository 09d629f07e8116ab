/// Nearest-rank percentile over an ascending slice: the element at
/// `floor(p * n)`, clamped to the last index. Returns 0 for an empty slice.
///
/// No interpolation: the median of an even-sized sample is the upper of the
/// two middle values.
pub fn nearest_rank(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() as f64) * p).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

#[inline]
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

/// Running totals for one endpoint (result label).
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointStats {
    pub count: u64,
    pub success: u64,
    pub error: u64,
    pub total_time: f64,
    pub min_time: f64,
    pub max_time: f64,
}

impl Default for EndpointStats {
    fn default() -> Self {
        Self {
            count: 0,
            success: 0,
            error: 0,
            total_time: 0.0,
            min_time: f64::INFINITY,
            max_time: 0.0,
        }
    }
}

impl EndpointStats {
    pub fn push(&mut self, elapsed: f64, success: bool) {
        self.count = self.count.saturating_add(1);
        self.total_time += elapsed;
        if success {
            self.success = self.success.saturating_add(1);
        } else {
            self.error = self.error.saturating_add(1);
        }

        if elapsed < self.min_time {
            self.min_time = elapsed;
        }
        if elapsed > self.max_time {
            self.max_time = elapsed;
        }
    }

    pub fn avg_time(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.total_time / self.count as f64
    }

    pub fn error_percentage(&self) -> f64 {
        percentage(self.error, self.count)
    }

    pub fn success_percentage(&self) -> f64 {
        percentage(self.success, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_rank_indexes_without_interpolation() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(nearest_rank(&sorted, 0.5), 30.0);
        assert_eq!(nearest_rank(&sorted, 0.95), 40.0);
        assert_eq!(nearest_rank(&sorted, 0.0), 10.0);
    }

    #[test]
    fn nearest_rank_clamps_to_last_element() {
        assert_eq!(nearest_rank(&[5.0], 0.99), 5.0);
        assert_eq!(nearest_rank(&[1.0, 2.0], 1.0), 2.0);
        assert_eq!(nearest_rank(&[], 0.5), 0.0);
    }

    #[test]
    fn endpoint_stats_track_extremes() {
        let mut s = EndpointStats::default();
        s.push(100.0, true);
        s.push(300.0, false);

        assert_eq!(s.count, 2);
        assert_eq!(s.min_time, 100.0);
        assert_eq!(s.max_time, 300.0);
        assert_eq!(s.avg_time(), 200.0);
        assert_eq!(s.error_percentage(), 50.0);
        assert_eq!(s.success_percentage(), 50.0);
    }

    #[test]
    fn empty_endpoint_stats_do_not_divide_by_zero() {
        let s = EndpointStats::default();
        assert_eq!(s.avg_time(), 0.0);
        assert_eq!(s.error_percentage(), 0.0);
    }
}
