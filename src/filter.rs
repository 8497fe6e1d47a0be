use crate::grid::Candidate;
use crate::options::ExportOptions;

/// Snapshot of the size constraints of one export run.
///
/// A `None` bound is disabled. With `enabled == false` every candidate passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeFilter {
    pub enabled: bool,
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl SizeFilter {
    /// A filter that lets everything through.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Tests truncated pixel dimensions against every enabled bound.
    ///
    /// # Example
    /// ```
    /// use gridcut::SizeFilter;
    ///
    /// let filter = SizeFilter { enabled: true, min_width: Some(60), ..Default::default() };
    /// assert!(!filter.passes(50, 50));
    /// assert!(filter.passes(60, 10));
    /// ```
    pub fn passes(&self, width: u32, height: u32) -> bool {
        if !self.enabled {
            return true;
        }
        self.min_width.map_or(true, |min| width >= min)
            && self.min_height.map_or(true, |min| height >= min)
            && self.max_width.map_or(true, |max| width <= max)
            && self.max_height.map_or(true, |max| height <= max)
    }

    pub fn accepts(&self, candidate: &Candidate) -> bool {
        self.passes(candidate.pixel_width(), candidate.pixel_height())
    }
}

impl From<&ExportOptions> for SizeFilter {
    fn from(options: &ExportOptions) -> Self {
        let bound = |enabled: bool, value: u32| enabled.then_some(value);
        Self {
            enabled: options.use_filters,
            min_width: bound(options.use_min_width, options.min_width.max(1)),
            min_height: bound(options.use_min_height, options.min_height.max(1)),
            max_width: bound(options.use_max_width, options.max_width),
            max_height: bound(options.use_max_height, options.max_height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn options(configure: impl FnOnce(&mut ExportOptions)) -> ExportOptions {
        let mut options = ExportOptions {
            use_filters: true,
            ..Default::default()
        };
        configure(&mut options);
        options
    }

    #[test_case(|o: &mut ExportOptions| { o.use_min_width = true; o.min_width = 60; }, 50, 50 => false; "min width enabled excludes")]
    #[test_case(|o: &mut ExportOptions| { o.use_min_width = false; o.min_width = 60; }, 50, 50 => true; "min width disabled includes")]
    #[test_case(|o: &mut ExportOptions| { o.use_min_height = true; o.min_height = 50; }, 10, 50 => true; "min height is inclusive")]
    #[test_case(|o: &mut ExportOptions| { o.use_max_width = true; o.max_width = 40; }, 50, 10 => false; "max width enabled excludes")]
    #[test_case(|o: &mut ExportOptions| { o.use_max_height = true; o.max_height = 50; }, 10, 50 => true; "max height is inclusive")]
    #[test_case(|o: &mut ExportOptions| { o.use_min_width = true; o.min_width = 10; o.use_max_height = true; o.max_height = 20; }, 50, 50 => false; "all enabled bounds must hold")]
    #[test_case(|o: &mut ExportOptions| { o.use_filters = false; o.use_min_width = true; o.min_width = 999; }, 50, 50 => true; "master flag short circuits")]
    fn test_filter(configure: fn(&mut ExportOptions), width: u32, height: u32) -> bool {
        SizeFilter::from(&options(configure)).passes(width, height)
    }

    #[test]
    fn test_zero_min_is_raised_to_one() {
        let filter = SizeFilter::from(&options(|o| {
            o.use_min_width = true;
            o.min_width = 0;
        }));
        assert_eq!(filter.min_width, Some(1));
        assert!(!filter.passes(0, 5));
    }

    #[test]
    fn test_candidate_uses_truncated_size() {
        let candidate = Candidate {
            source_index: 0,
            slice_index: 0,
            x: 0.0,
            y: 0.0,
            width: 59.9,
            height: 80.0,
        };
        let filter = SizeFilter::from(&options(|o| {
            o.use_min_width = true;
            o.min_width = 60;
        }));
        assert!(!filter.accepts(&candidate));
        assert!(SizeFilter::disabled().accepts(&candidate));
    }
}
