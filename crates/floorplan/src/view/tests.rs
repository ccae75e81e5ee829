//! Unit tests for map view state.

#[cfg(test)]
mod tests {
    use crate::level::{FloorRegistry, LevelSpan};
    use crate::settings::VisibilitySettings;
    use crate::user_location::UserLocation;

    use super::super::*;

    fn floors(spans: &[(i32, i32)]) -> FloorState {
        let mut state = FloorState::default();
        state.replace_registry(FloorRegistry::from_spans(
            spans.iter().map(|&(a, b)| LevelSpan::range(a, b)),
        ));
        state
    }

    #[test]
    fn test_empty_state_has_no_active_floor() {
        let state = FloorState::default();
        assert!(!state.has_floors());
        assert_eq!(state.active_floor(), None);
    }

    #[test]
    fn test_registry_swap_falls_back_to_lowest() {
        let mut state = floors(&[(1, 3)]);
        assert!(state.select(3));
        assert_eq!(
            state.replace_registry(FloorRegistry::from_spans([LevelSpan::range(4, 6)])),
            Some(4)
        );
        assert_eq!(
            state.replace_registry(FloorRegistry::from_spans([LevelSpan::range(2, 5)])),
            Some(4)
        );
    }

    #[test]
    fn test_empty_registry_keeps_floor_inactive() {
        let mut state = floors(&[(2, 2)]);
        assert_eq!(state.replace_registry(FloorRegistry::default()), None);
        assert!(!state.select(2));
    }

    #[test]
    fn test_layer_options_seed_from_visibility() {
        let visibility = VisibilitySettings {
            show_service_paths: true,
            show_utilities: false,
        };
        let mut options = LayerOptions::from_visibility(&visibility);
        options.amenity = Some("cafe".to_string());
        options.sync_visibility(&VisibilitySettings::default());

        assert_eq!(options.amenity.as_deref(), Some("cafe"));
        assert!(!options.show_service_paths);
        assert!(options.show_utilities);

        let filter = options.layer_filter(7);
        assert_eq!(filter.floor, 7);
        assert_eq!(filter.amenity.as_deref(), Some("cafe"));
    }

    #[test]
    fn test_placing_user_moves_only_to_known_floors() {
        let mut state = floors(&[(1, 6)]);
        let mut interaction = MapInteraction::default();

        interaction.place_user(
            UserLocation {
                latitude: 1.3,
                longitude: 103.7,
                level: 5,
            },
            &mut state,
        );
        assert_eq!(state.active_floor(), Some(5));

        interaction.place_user(
            UserLocation {
                latitude: 1.3,
                longitude: 103.7,
                level: 12,
            },
            &mut state,
        );
        assert_eq!(state.active_floor(), Some(5));
        assert_eq!(interaction.user_location.map(|l| l.level), Some(12));

        interaction.clear_user_location();
        assert!(interaction.user_location.is_none());
    }
}
