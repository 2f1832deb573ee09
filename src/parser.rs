//! JSON decoders for `getStopInfo` responses.

use serde_json::Result;

use crate::schema::{StopInfoResponse, TokenCarrier};

/// Decodes the success envelope. A body without `data` still decodes; callers
/// decide whether a missing `data` is an error.
///
/// # Errors
///
/// Returns an error if the bytes are not JSON matching [`StopInfoResponse`].
pub fn parse_stop_info(bytes: &[u8]) -> Result<StopInfoResponse> {
    serde_json::from_slice(bytes)
}

/// Decodes the `{"csrfToken": "..."}` body the backend sends when the request
/// lacked a valid token.
///
/// # Errors
///
/// Returns an error if the bytes are not a JSON object.
pub fn parse_csrf_token(bytes: &[u8]) -> Result<TokenCarrier> {
    serde_json::from_slice(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_body_has_no_data() {
        let body = br#"{"csrfToken":"abc:123"}"#;
        let resp = parse_stop_info(body).unwrap();
        assert!(resp.data.is_none());

        let carrier = parse_csrf_token(body).unwrap();
        assert_eq!(carrier.token(), Some("abc:123"));
    }

    #[test]
    fn test_parse_invalid_bytes() {
        assert!(parse_stop_info(b"<html></html>").is_err());
        assert!(parse_csrf_token(b"<html></html>").is_err());
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let body = br#"{
            "data": {
                "id": "stop__9645370",
                "name": "Test Stop",
                "coordinates": [37.6, 55.7],
                "transports": [{
                    "lineId": "213_1_bus",
                    "name": "1",
                    "type": "bus",
                    "threads": [{
                        "threadId": "t1",
                        "BriefSchedule": {
                            "Events": [{
                                "Scheduled": {"value": "1700000000", "tzOffset": 10800, "text": "01:13"},
                                "vehicleId": "v42"
                            }],
                            "Frequency": {"text": "10 min"}
                        }
                    }]
                }]
            }
        }"#;

        let data = parse_stop_info(body).unwrap().data.unwrap();
        assert_eq!(data.name.as_deref(), Some("Test Stop"));
        let thread = &data.transports[0].threads[0];
        assert!(!thread.no_boarding);
        let event = &thread.events()[0];
        assert!(event.estimated.is_none());
        assert_eq!(event.scheduled.as_ref().unwrap().tz_offset, Some(10800));
        assert_eq!(event.vehicle_id.as_deref(), Some("v42"));
    }

    #[test]
    fn test_parse_null_collections_and_flags() {
        let body = br#"{"data":{"name":"Nulls","transports":[
            {"name":"A","threads":null},
            {"name":"B","threads":[
                {"noBoarding":null,"BriefSchedule":{"Events":[{"Scheduled":{"value":"1700000000"}}]}},
                {"noBoarding":false,"BriefSchedule":{"Events":null}}
            ]}
        ]}}"#;

        let data = parse_stop_info(body).unwrap().data.unwrap();
        assert!(data.transports[0].threads.is_empty());
        let threads = &data.transports[1].threads;
        assert!(!threads[0].no_boarding);
        assert_eq!(threads[0].events().len(), 1);
        assert!(threads[1].events().is_empty());

        let data = parse_stop_info(br#"{"data":{"name":"Empty","transports":null}}"#)
            .unwrap()
            .data
            .unwrap();
        assert!(data.transports.is_empty());
    }

    #[test]
    fn test_parse_missing_transports_defaults_empty() {
        let data = parse_stop_info(br#"{"data":{"name":"Lonely"}}"#)
            .unwrap()
            .data
            .unwrap();
        assert!(data.transports.is_empty());
    }
}
