use super::*;

#[test]
fn test_as_str_round_trips_through_from_str() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
    }
}

#[test]
fn test_from_str_is_case_insensitive() {
    assert_eq!("e0005".parse::<ErrorCode>(), Ok(ErrorCode::E0005));
}

#[test]
fn test_unknown_code() {
    let err = "E9999".parse::<ErrorCode>().unwrap_err();
    assert_eq!(err.to_string(), "unknown error code `E9999`");
}

#[test]
fn test_every_code_is_documented() {
    for code in ErrorCode::ALL {
        assert!(!code.description().is_empty(), "{code} has no description");
    }
}
