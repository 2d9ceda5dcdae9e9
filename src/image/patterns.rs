//! Structural dimension patterns in URL paths.
//!
//! Shared by the analyzer (to detect) and the rewriter (to re-detect and
//! replace), so both always agree on which segment carries the dimensions.

use std::sync::LazyLock;

use regex::Regex;

static DIMENSIONS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)x(\d+)$").expect("valid regex"));
static WIDTH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^w(\d+)$").expect("valid regex"));
static HEIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^h(\d+)$").expect("valid regex"));
static SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(size[_-])(\d+)x(\d+)$").expect("valid regex"));
static FILENAME_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+)-(\d+)x(\d+)(\.[A-Za-z0-9]+)$").expect("valid regex")
});

/// Path pattern forms, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathForm {
    /// `800x600`
    Dimensions,
    /// `w800`
    Width,
    /// `h600`
    Height,
    /// `size_800x600` or `size-800x600`
    SizeDimensions,
    /// `photo-800x600.jpg` (last segment only)
    FilenameSuffix,
}

impl PathForm {
    pub const ORDER: [PathForm; 5] = [
        PathForm::Dimensions,
        PathForm::Width,
        PathForm::Height,
        PathForm::SizeDimensions,
        PathForm::FilenameSuffix,
    ];

    pub fn has_width(self) -> bool {
        !matches!(self, PathForm::Height)
    }

    pub fn has_height(self) -> bool {
        !matches!(self, PathForm::Width)
    }

    fn regex(self) -> &'static Regex {
        match self {
            PathForm::Dimensions => &DIMENSIONS_RE,
            PathForm::Width => &WIDTH_RE,
            PathForm::Height => &HEIGHT_RE,
            PathForm::SizeDimensions => &SIZE_RE,
            PathForm::FilenameSuffix => &FILENAME_SUFFIX_RE,
        }
    }

    /// Parses a segment in this form into (width, height).
    ///
    /// Numbers that do not fit a `u32` or are zero are not a match.
    fn parse(self, segment: &str) -> Option<(Option<u32>, Option<u32>)> {
        let caps = self.regex().captures(segment)?;
        let num = |i: usize| -> Option<u32> {
            caps.get(i)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .filter(|n| *n > 0)
        };
        match self {
            PathForm::Dimensions => Some((Some(num(1)?), Some(num(2)?))),
            PathForm::Width => Some((Some(num(1)?), None)),
            PathForm::Height => Some((None, Some(num(1)?))),
            PathForm::SizeDimensions | PathForm::FilenameSuffix => {
                Some((Some(num(2)?), Some(num(3)?)))
            }
        }
    }

    /// Renders `segment` with its numbers replaced; `None` keeps the old value.
    fn render(self, segment: &str, width: Option<u32>, height: Option<u32>) -> Option<String> {
        let caps = self.regex().captures(segment)?;
        let group = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or("");
        let pick = |new: Option<u32>, i: usize| new.map(|n| n.to_string()).unwrap_or_else(|| group(i).to_string());
        Some(match self {
            PathForm::Dimensions => format!("{}x{}", pick(width, 1), pick(height, 2)),
            PathForm::Width => format!("w{}", pick(width, 1)),
            PathForm::Height => format!("h{}", pick(height, 1)),
            PathForm::SizeDimensions => {
                format!("{}{}x{}", group(1), pick(width, 2), pick(height, 3))
            }
            PathForm::FilenameSuffix => format!(
                "{}-{}x{}{}",
                group(1),
                pick(width, 2),
                pick(height, 3),
                group(4)
            ),
        })
    }
}

/// A path segment carrying dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PathMatch {
    pub form: PathForm,
    /// Index into `path.split('/')`
    pub segment_index: usize,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Finds the first segment matching a path form; form order wins over
/// segment order.
pub(crate) fn find_path_dimensions(segments: &[&str]) -> Option<PathMatch> {
    let last = segments.len().checked_sub(1)?;
    for form in PathForm::ORDER {
        for (index, segment) in segments.iter().enumerate() {
            if form == PathForm::FilenameSuffix && index != last {
                continue;
            }
            if let Some((width, height)) = form.parse(segment) {
                return Some(PathMatch {
                    form,
                    segment_index: index,
                    width,
                    height,
                });
            }
        }
    }
    None
}

/// Replaces the numbers of a matched segment.
pub(crate) fn rewrite_segment(
    segment: &str,
    form: PathForm,
    width: Option<u32>,
    height: Option<u32>,
) -> Option<String> {
    form.render(segment, width, height)
}
