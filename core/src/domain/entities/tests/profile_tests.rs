//! Unit tests for the profile entity

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::entities::profile::{Profile, ProfileUpdate};

#[test]
fn test_new_profile_uses_default_avatar() {
    let profile = Profile::new(Uuid::new_v4(), "default_avatar.png");

    assert_eq!(profile.avatar_path, "default_avatar.png");
    assert!(profile.first_name.is_none());
}

#[test]
fn test_apply_keeps_unset_fields() {
    let mut profile = Profile::new(Uuid::new_v4(), "default_avatar.png");
    profile.apply(ProfileUpdate {
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        ..Default::default()
    });
    profile.apply(ProfileUpdate {
        birth_date: NaiveDate::from_ymd_opt(1815, 12, 10),
        ..Default::default()
    });

    assert_eq!(profile.first_name.as_deref(), Some("Ada"));
    assert_eq!(profile.last_name.as_deref(), Some("Lovelace"));
    assert_eq!(profile.birth_date, NaiveDate::from_ymd_opt(1815, 12, 10));
    assert!(profile.phone_number.is_none());
}
