//! Conversion from Distance Matrix responses to travel minutes.

use super::error::OracleError;
use super::types::DistanceMatrixResponse;

/// Round a duration in seconds to whole minutes, halves rounding up.
pub fn seconds_to_minutes(seconds: f64) -> u32 {
    let minutes = (seconds.max(0.0) / 60.0 + 0.5).floor();
    if minutes >= u32::MAX as f64 {
        u32::MAX
    } else {
        minutes as u32
    }
}

/// Extract the single origin→destination duration from a response.
pub fn travel_minutes(response: &DistanceMatrixResponse) -> Result<u32, OracleError> {
    let status = response.status.as_deref().unwrap_or("MISSING");
    if status != "OK" {
        return Err(OracleError::ApiStatus {
            status: status.to_string(),
            message: response.error_message.clone().unwrap_or_default(),
        });
    }

    let element = response
        .rows
        .first()
        .and_then(|row| row.elements.first())
        .ok_or_else(|| OracleError::malformed("missing rows[0].elements[0]"))?;

    let element_status = element.status.as_deref().unwrap_or("MISSING");
    if element_status != "OK" {
        return Err(OracleError::NoRouteFound {
            status: element_status.to_string(),
        });
    }

    let seconds = element
        .duration
        .as_ref()
        .and_then(|d| d.value)
        .ok_or_else(|| OracleError::malformed("missing duration.value"))?;

    Ok(seconds_to_minutes(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> DistanceMatrixResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn rounds_to_nearest_minute() {
        assert_eq!(seconds_to_minutes(0.0), 0);
        assert_eq!(seconds_to_minutes(29.0), 0);
        assert_eq!(seconds_to_minutes(30.0), 1);
        assert_eq!(seconds_to_minutes(89.0), 1);
        assert_eq!(seconds_to_minutes(90.0), 2);
        assert_eq!(seconds_to_minutes(150.0), 3);
        assert_eq!(seconds_to_minutes(262.0), 4);
        assert_eq!(seconds_to_minutes(-5.0), 0);
    }

    #[test]
    fn ok_element() {
        let resp = parse(
            r#"{"status":"OK","rows":[{"elements":[{"status":"OK","duration":{"text":"10 mins","value":610}}]}]}"#,
        );
        assert_eq!(travel_minutes(&resp).unwrap(), 10);
    }

    #[test]
    fn non_ok_status() {
        let resp = parse(r#"{"status":"REQUEST_DENIED","error_message":"bad key","rows":[]}"#);
        match travel_minutes(&resp) {
            Err(OracleError::ApiStatus { status, message }) => {
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(message, "bad key");
            }
            other => panic!("expected ApiStatus, got {other:?}"),
        }
    }

    #[test]
    fn missing_status_is_not_ok() {
        let resp = parse(r#"{"rows":[]}"#);
        assert!(matches!(
            travel_minutes(&resp),
            Err(OracleError::ApiStatus { .. })
        ));
    }

    #[test]
    fn missing_element() {
        let resp = parse(r#"{"status":"OK","rows":[{"elements":[]}]}"#);
        assert!(matches!(
            travel_minutes(&resp),
            Err(OracleError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn zero_results() {
        let resp = parse(r#"{"status":"OK","rows":[{"elements":[{"status":"ZERO_RESULTS"}]}]}"#);
        match travel_minutes(&resp) {
            Err(OracleError::NoRouteFound { status }) => assert_eq!(status, "ZERO_RESULTS"),
            other => panic!("expected NoRouteFound, got {other:?}"),
        }
    }

    #[test]
    fn missing_duration() {
        let resp = parse(r#"{"status":"OK","rows":[{"elements":[{"status":"OK"}]}]}"#);
        assert!(matches!(
            travel_minutes(&resp),
            Err(OracleError::MalformedResponse { .. })
        ));
    }
}
