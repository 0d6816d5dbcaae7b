use serde::{Deserialize, Deserializer, Serialize};

/// One page of the `/wow-observations` listing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Number of observations across all pages, as reported on this page
    pub total_results: u64,
    /// Page number echoed back by the API (informational only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size echoed back by the API (informational only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    pub results: Vec<Observation>,
}

/// A single observation record
///
/// All observations submitted through the WOW app are obscured, but records
/// created with other iNaturalist clients may not be. The text fields must be
/// present in every record but may be `null`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: u64,
    #[serde(deserialize_with = "nullable")]
    pub time_observed_at: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub species_guess: Option<String>,
    pub obscured: bool,
    /// Public, possibly fuzzed, `"lat,lng"` location
    #[serde(deserialize_with = "nullable")]
    pub location: Option<String>,
    /// True `"lat,lng"` location, only visible to privileged API keys
    #[serde(deserialize_with = "nullable")]
    pub private_location: Option<String>,
    #[serde(rename = "ofvs")]
    pub observation_field_values: Vec<ObservationFieldValue>,
}

impl Observation {
    /// Location to show for this record.
    ///
    /// Obscured records only carry their real coordinates in
    /// `private_location`; the public `location` is never used for them.
    pub fn display_location(&self) -> Option<&str> {
        if self.obscured {
            self.private_location.as_deref()
        } else {
            self.location.as_deref()
        }
    }
}

// Using `deserialize_with` keeps the key required: serde only defaults a
// missing `Option` field when it deserializes the field itself.
fn nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

/// A user supplied name/value annotation on an observation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationFieldValue {
    pub name: String,
    pub value: String,
}

impl std::fmt::Display for ObservationFieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn observation(obscured: bool) -> Observation {
        Observation {
            id: 42,
            time_observed_at: Some("2020-10-01T10:00:00+09:30".to_string()),
            species_guess: Some("Caladenia tentaculata".to_string()),
            obscured,
            location: Some("-34.9,138.6".to_string()),
            private_location: Some("-34.9285,138.6007".to_string()),
            observation_field_values: vec![],
        }
    }

    #[test]
    fn obscured_record_uses_private_location() {
        assert_eq!(observation(true).display_location(), Some("-34.9285,138.6007"));
    }

    #[test]
    fn unobscured_record_uses_public_location() {
        assert_eq!(observation(false).display_location(), Some("-34.9,138.6"));
    }

    #[test]
    fn decodes_wire_shape() {
        let body = json!({
            "total_results": 1,
            "page": 1,
            "per_page": 3,
            "results": [{
                "id": 7,
                "time_observed_at": "2020-09-12T13:41:00+09:30",
                "species_guess": "Pterostylis",
                "obscured": true,
                "location": "-35.0,138.7",
                "private_location": "-35.0123,138.7456",
                "ofvs": [{"name": "Orchid type", "value": "Terrestrial"}],
                "uri": "https://www.inaturalist.org/observations/7"
            }]
        });

        let page: ApiResponse = serde_json::from_value(body).unwrap();
        assert_eq!(page.total_results, 1);
        assert_eq!(page.per_page, Some(3));
        let obs = &page.results[0];
        assert_eq!(obs.id, 7);
        assert_eq!(
            obs.observation_field_values[0].to_string(),
            "Orchid type=Terrestrial"
        );
    }

    #[test]
    fn missing_field_is_rejected() {
        let body = json!({
            "total_results": 1,
            "results": [{
                "id": 7,
                "time_observed_at": "2020-09-12T13:41:00+09:30",
                "species_guess": "Pterostylis",
                "location": "-35.0,138.7",
                "private_location": "-35.0123,138.7456",
                "ofvs": []
            }]
        });

        let err = serde_json::from_value::<ApiResponse>(body).unwrap_err();
        assert!(err.to_string().contains("obscured"));
    }

    #[test]
    fn null_values_are_accepted() {
        let body = json!({
            "id": 8,
            "time_observed_at": null,
            "species_guess": null,
            "obscured": false,
            "location": "-34.9,138.6",
            "private_location": null,
            "ofvs": []
        });

        let obs: Observation = serde_json::from_value(body).unwrap();
        assert_eq!(obs.time_observed_at, None);
        assert_eq!(obs.species_guess, None);
        assert_eq!(obs.display_location(), Some("-34.9,138.6"));
    }

    #[test]
    fn missing_nullable_key_is_still_rejected() {
        let body = json!({
            "id": 8,
            "time_observed_at": null,
            "species_guess": null,
            "obscured": false,
            "location": "-34.9,138.6",
            "ofvs": []
        });

        let err = serde_json::from_value::<Observation>(body).unwrap_err();
        assert!(err.to_string().contains("private_location"));
    }

    #[test]
    fn obscured_record_never_falls_back_to_public_location() {
        let mut obs = observation(true);
        obs.private_location = None;
        assert_eq!(obs.display_location(), None);
    }
}
