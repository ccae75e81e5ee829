use crate::config::MAX_LEVEL_SPAN;

/// The set of floors a feature occupies.
///
/// Level strings only ever describe a single floor or an inclusive run of
/// floors, so the set is stored as its bounds. An empty span means the level
/// string did not parse and the feature is hidden on every floor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LevelSpan {
    bounds: Option<(i32, i32)>,
}

impl LevelSpan {
    pub const EMPTY: LevelSpan = LevelSpan { bounds: None };

    pub fn single(floor: i32) -> Self {
        Self {
            bounds: Some((floor, floor)),
        }
    }

    /// Inclusive span `start..=end`. A reversed span is empty.
    pub fn range(start: i32, end: i32) -> Self {
        if start > end {
            return Self::EMPTY;
        }
        Self {
            bounds: Some((start, end)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    pub fn contains(&self, floor: i32) -> bool {
        match self.bounds {
            Some((start, end)) => start <= floor && floor <= end,
            None => false,
        }
    }

    /// Lowest floor in the span.
    pub fn first(&self) -> Option<i32> {
        self.bounds.map(|(start, _)| start)
    }

    /// Highest floor in the span.
    pub fn last(&self) -> Option<i32> {
        self.bounds.map(|(_, end)| end)
    }

    pub fn len(&self) -> usize {
        match self.bounds {
            Some((start, end)) => (i64::from(end) - i64::from(start) + 1) as usize,
            None => 0,
        }
    }

    /// Every floor in the span, ascending.
    pub fn iter(&self) -> impl Iterator<Item = i32> {
        self.bounds.into_iter().flat_map(|(start, end)| start..=end)
    }
}

/// Resolve a `level` tag into the floors it denotes.
///
/// Grammar: a single integer (`"6"`) or an inclusive range of two integers
/// separated by one hyphen (`"6-12"`). Anything else, including reversed
/// ranges, ranges longer than [`MAX_LEVEL_SPAN`] floors and strings with
/// several hyphens, resolves to [`LevelSpan::EMPTY`].
pub fn parse_level(raw: &str) -> LevelSpan {
    let mut parts = raw.split('-');
    let first = parts.next().unwrap_or_default();

    match (parts.next(), parts.next()) {
        (None, _) => parse_floor(first).map_or(LevelSpan::EMPTY, LevelSpan::single),
        (Some(second), None) => match (parse_floor(first), parse_floor(second)) {
            (Some(start), Some(end))
                if i64::from(end) - i64::from(start) < MAX_LEVEL_SPAN =>
            {
                LevelSpan::range(start, end)
            }
            _ => LevelSpan::EMPTY,
        },
        // more than one hyphen
        (Some(_), Some(_)) => LevelSpan::EMPTY,
    }
}

fn parse_floor(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}
