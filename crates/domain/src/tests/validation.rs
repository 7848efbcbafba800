// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, RawProfile, UserProfile, parse_flag, validate_user_profile};

fn valid_raw() -> RawProfile<'static> {
    RawProfile {
        username: Some("alice"),
        email: Some("alice@example.com"),
        password: Some(" secret "),
        first_name: Some("Alice"),
        last_name: Some("Liddell"),
        birthday: Some("1990-02-14"),
        fav_resort: Some("1"),
    }
}

#[test]
fn test_valid_profile_passes() {
    let profile: UserProfile = validate_user_profile(&valid_raw()).unwrap();
    assert_eq!(profile.username, "alice");
    assert_eq!(profile.email, "alice@example.com");
    assert_eq!(profile.birthday.to_string(), "1990-02-14");
    assert_eq!(profile.fav_resort, 1);
}

#[test]
fn test_password_is_kept_verbatim() {
    let profile: UserProfile = validate_user_profile(&valid_raw()).unwrap();
    assert_eq!(profile.password, " secret ");
}

#[test]
fn test_each_missing_field_is_reported() {
    let cases: [(&str, RawProfile<'static>); 7] = [
        ("username", RawProfile { username: None, ..valid_raw() }),
        ("email", RawProfile { email: Some(" "), ..valid_raw() }),
        ("password", RawProfile { password: Some(""), ..valid_raw() }),
        ("first_name", RawProfile { first_name: None, ..valid_raw() }),
        ("last_name", RawProfile { last_name: None, ..valid_raw() }),
        ("birthday", RawProfile { birthday: None, ..valid_raw() }),
        ("fav_resort", RawProfile { fav_resort: Some(""), ..valid_raw() }),
    ];

    for (field, raw) in cases {
        assert_eq!(
            validate_user_profile(&raw),
            Err(DomainError::MissingField { field }),
            "expected {field} to be reported missing"
        );
    }
}

#[test]
fn test_invalid_birthday_is_rejected() {
    let raw: RawProfile<'static> = RawProfile {
        birthday: Some("02/14/1990"),
        ..valid_raw()
    };
    assert!(matches!(
        validate_user_profile(&raw),
        Err(DomainError::InvalidDate { field: "birthday", .. })
    ));
}

#[test]
fn test_invalid_favorite_resort_is_rejected() {
    let raw: RawProfile<'static> = RawProfile {
        fav_resort: Some("Snowbird"),
        ..valid_raw()
    };
    assert!(matches!(
        validate_user_profile(&raw),
        Err(DomainError::InvalidIdentifier { field: "fav_resort", .. })
    ));
}

#[test]
fn test_parse_flag_accepts_checkbox_and_seed_values() {
    for value in ["on", "true", "TRUE", "1", "t", "yes", "Y"] {
        assert!(parse_flag(Some(value)), "{value} should be truthy");
    }
    for value in ["", "off", "false", "0", "no", "maybe"] {
        assert!(!parse_flag(Some(value)), "{value} should be falsy");
    }
    assert!(!parse_flag(None));
}
