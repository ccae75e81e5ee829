//! Unit tests for level parsing and the floor registry.

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::features::{Feature, FeatureCollection, FeatureTags};

    fn feature_with_level(level: &str) -> Feature {
        Feature::new(
            None,
            FeatureTags {
                level: Some(level.to_string()),
                ..Default::default()
            },
        )
    }

    // -------------------------------------------------------------------------
    // parse_level
    // -------------------------------------------------------------------------

    #[test]
    fn test_single_integer_is_one_floor() {
        for floor in [0, 1, 6, 42] {
            let span = parse_level(&floor.to_string());
            assert_eq!(span, LevelSpan::single(floor));
            assert_eq!(span.iter().collect::<Vec<_>>(), vec![floor]);
        }
    }

    #[test]
    fn test_range_is_inclusive() {
        let span = parse_level("3-5");
        assert_eq!(span.iter().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(span.len(), 3);
        assert_eq!(span.first(), Some(3));
        assert_eq!(span.last(), Some(5));
    }

    #[test]
    fn test_degenerate_range_is_one_floor() {
        assert_eq!(parse_level("7-7"), LevelSpan::single(7));
    }

    #[test]
    fn test_reversed_range_is_empty() {
        assert!(parse_level("5-3").is_empty());
    }

    #[test]
    fn test_non_numeric_is_empty() {
        for raw in ["", "bad", "B1", "1.5", "3-x", "x-3", "-"] {
            assert!(parse_level(raw).is_empty(), "{raw:?} should not parse");
        }
    }

    #[test]
    fn test_multiple_hyphens_are_empty() {
        assert!(parse_level("1-2-3").is_empty());
        assert!(parse_level("1--3").is_empty());
    }

    #[test]
    fn test_leading_minus_is_a_hyphen() {
        // "-2" splits into "" and "2"; the empty half fails to parse.
        assert!(parse_level("-2").is_empty());
    }

    #[test]
    fn test_overlong_range_is_empty() {
        use crate::config::MAX_LEVEL_SPAN;

        let longest = format!("1-{}", MAX_LEVEL_SPAN);
        assert_eq!(parse_level(&longest).len(), MAX_LEVEL_SPAN as usize);
        assert!(parse_level(&format!("1-{}", MAX_LEVEL_SPAN + 1)).is_empty());
        assert!(parse_level("0-2000000000").is_empty());

        let registry = FloorRegistry::from_collection(&FeatureCollection::new(vec![
            feature_with_level("0-2000000000"),
            feature_with_level("2"),
        ]));
        assert_eq!(registry.floors(), &[2]);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(parse_level(" 4 "), LevelSpan::single(4));
        assert_eq!(parse_level("1 - 2"), LevelSpan::range(1, 2));
    }

    #[test]
    fn test_empty_span_contains_nothing() {
        let span = LevelSpan::EMPTY;
        assert!(!span.contains(0));
        assert_eq!(span.len(), 0);
        assert_eq!(span.iter().count(), 0);
        assert_eq!(span.first(), None);
    }

    #[test]
    fn test_span_contains_bounds() {
        let span = LevelSpan::range(6, 12);
        assert!(span.contains(6));
        assert!(span.contains(9));
        assert!(span.contains(12));
        assert!(!span.contains(5));
        assert!(!span.contains(13));
    }

    // -------------------------------------------------------------------------
    // FloorRegistry
    // -------------------------------------------------------------------------

    #[test]
    fn test_registry_example_skips_malformed() {
        let collection = FeatureCollection::new(vec![
            feature_with_level("1"),
            feature_with_level("3-5"),
            feature_with_level("bad"),
        ]);
        let registry = FloorRegistry::from_collection(&collection);
        assert_eq!(registry.floors(), &[1, 3, 4, 5]);
    }

    #[test]
    fn test_registry_is_sorted_and_unique() {
        let collection = FeatureCollection::new(vec![
            feature_with_level("9"),
            feature_with_level("2-4"),
            feature_with_level("3"),
            feature_with_level("4-6"),
            feature_with_level("2"),
        ]);
        let registry = FloorRegistry::from_collection(&collection);
        let floors = registry.floors();
        assert_eq!(floors, &[2, 3, 4, 5, 6, 9]);
        assert!(floors.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_registry_ignores_features_without_level() {
        let collection = FeatureCollection::new(vec![
            Feature::new(None, FeatureTags::default()),
            feature_with_level("2"),
        ]);
        assert_eq!(FloorRegistry::from_collection(&collection).floors(), &[2]);
    }

    #[test]
    fn test_empty_registry_has_no_active_floor() {
        let registry = FloorRegistry::from_collection(&FeatureCollection::default());
        assert!(registry.is_empty());
        assert_eq!(registry.lowest(), None);
        assert_eq!(registry.reconcile(1), None);
    }

    #[test]
    fn test_reconcile_keeps_available_floor() {
        let registry = FloorRegistry::from_spans([LevelSpan::range(0, 3)]);
        assert_eq!(registry.reconcile(1), Some(1));
    }

    #[test]
    fn test_reconcile_falls_back_to_lowest() {
        let registry = FloorRegistry::from_spans([LevelSpan::range(6, 12), LevelSpan::single(14)]);
        assert_eq!(registry.reconcile(1), Some(6));
        assert_eq!(registry.reconcile(13), Some(6));
    }

    #[test]
    fn test_above_and_below_skip_gaps() {
        let registry = FloorRegistry::from_spans([LevelSpan::single(1), LevelSpan::range(4, 5)]);
        assert_eq!(registry.above(1), Some(4));
        assert_eq!(registry.below(4), Some(1));
        assert_eq!(registry.above(5), None);
        assert_eq!(registry.below(1), None);
        assert_eq!(registry.highest(), Some(5));
        assert_eq!(registry.len(), 3);
    }
}
