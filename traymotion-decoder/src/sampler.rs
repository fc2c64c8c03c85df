//! Stride sampling of composited frames under a frame budget

/// Which composited steps survive into the output.
///
/// With `N` steps and a budget of `M`, the stride is `ceil(N / M)` and steps
/// `0, stride, 2*stride, ...` are taken until the source or the budget runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePlan {
    total: usize,
    max_frames: usize,
    stride: usize,
}

impl SamplePlan {
    /// Plans sampling of `total` steps into at most `max_frames` frames
    pub fn new(total: usize, max_frames: usize) -> Self {
        let max_frames = max_frames.max(1);
        let stride = total.div_ceil(max_frames).max(1);
        Self {
            total,
            max_frames,
            stride,
        }
    }

    /// Distance between sampled steps
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether step `index` is kept
    pub fn selects(&self, index: usize) -> bool {
        index < self.total && index % self.stride == 0 && index / self.stride < self.max_frames
    }

    /// Kept step indices in order
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        (0..self.total).step_by(self.stride).take(self.max_frames)
    }

    /// Number of frames the plan produces
    pub fn len(&self) -> usize {
        self.total.div_ceil(self.stride).min(self.max_frames)
    }

    /// Returns true when nothing is selected
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the last kept step
    pub fn last_index(&self) -> Option<usize> {
        self.len().checked_sub(1).map(|n| n * self.stride)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stride_is_ceiling() {
        assert_eq!(SamplePlan::new(100, 30).stride(), 4);
        assert_eq!(SamplePlan::new(30, 30).stride(), 1);
        assert_eq!(SamplePlan::new(31, 30).stride(), 2);
        assert_eq!(SamplePlan::new(5, 60).stride(), 1);
        assert_eq!(SamplePlan::new(0, 15).stride(), 1);
    }

    #[test]
    fn test_length_never_exceeds_budget() {
        for max in [15, 30, 60] {
            for total in 0..400 {
                let plan = SamplePlan::new(total, max);
                let indices: Vec<_> = plan.indices().collect();
                assert!(indices.len() <= max);
                assert_eq!(indices.len(), plan.len());
                assert_eq!(plan.stride(), total.div_ceil(max).max(1));
                assert_eq!(indices.last().copied(), plan.last_index());
                for index in 0..total {
                    assert_eq!(plan.selects(index), indices.contains(&index));
                }
            }
        }
    }

    #[test]
    fn test_indices_follow_stride() {
        let plan = SamplePlan::new(10, 4);
        assert_eq!(plan.indices().collect::<Vec<_>>(), vec![0, 3, 6, 9]);
        assert!(!plan.selects(10));
    }

    #[test]
    fn test_empty_plan() {
        let plan = SamplePlan::new(0, 30);
        assert!(plan.is_empty());
        assert_eq!(plan.last_index(), None);
    }
}
