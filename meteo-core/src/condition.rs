//! WMO weather interpretation codes as reported by Open-Meteo.

pub const UNKNOWN_LABEL: &str = "Unknown";

const CONDITIONS: &[(i64, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Foggy"),
    (48, "Foggy"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (71, "Slight snow"),
    (73, "Moderate snow"),
    (75, "Heavy snow"),
    (77, "Snow grains"),
    (80, "Slight rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rain showers"),
    (85, "Slight snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm with hail"),
    (99, "Thunderstorm with hail"),
];

/// Human-readable label for a condition code. Never fails.
pub fn label(code: i64) -> &'static str {
    CONDITIONS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, label)| *label)
        .unwrap_or(UNKNOWN_LABEL)
}

/// All codes with a dedicated label, ascending.
pub fn known_codes() -> impl Iterator<Item = i64> {
    CONDITIONS.iter().map(|(code, _)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_documented_labels() {
        assert_eq!(label(0), "Clear sky");
        assert_eq!(label(3), "Overcast");
        assert_eq!(label(55), "Dense drizzle");
        assert_eq!(label(77), "Snow grains");
        assert_eq!(label(82), "Violent rain showers");
        assert_eq!(label(95), "Thunderstorm");
    }

    #[test]
    fn fog_and_hail_codes_share_labels() {
        assert_eq!(label(45), "Foggy");
        assert_eq!(label(48), "Foggy");
        assert_eq!(label(96), "Thunderstorm with hail");
        assert_eq!(label(99), "Thunderstorm with hail");
    }

    #[test]
    fn unmapped_codes_are_unknown() {
        for code in [-1, 4, 44, 50, 98, 100, i64::MAX] {
            assert_eq!(label(code), UNKNOWN_LABEL, "code {code}");
        }
    }

    #[test]
    fn every_known_code_has_a_real_label() {
        assert_eq!(known_codes().count(), 24);
        for code in known_codes() {
            assert_ne!(label(code), UNKNOWN_LABEL, "code {code}");
        }
    }
}
