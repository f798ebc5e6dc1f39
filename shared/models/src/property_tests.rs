//! Property-based tests for the shared domain models.
//!
//! Validates that profile validation accepts the full documented score ranges
//! and that field-presence checks agree with the underlying options.

use proptest::option;
use proptest::prelude::*;
use validator::Validate;

use crate::profile::ApplicantProfile;

prop_compose! {
    fn arb_email()(
        local in "[a-z]{3,10}",
        domain in "[a-z]{3,10}",
        tld in "[a-z]{2,4}"
    ) -> String {
        format!("{}@{}.{}", local, domain, tld)
    }
}

prop_compose! {
    fn arb_profile()(
        full_name in "[A-Za-z ]{5,40}",
        email in arb_email(),
        gpa in option::of(0.0..=4.0f64),
        gre in option::of(130..=340i32),
        toefl in option::of(0..=120i32),
        ielts in option::of(0.0..=9.0f64)
    ) -> ApplicantProfile {
        let mut profile = ApplicantProfile::new(full_name, email);
        profile.gpa = gpa;
        profile.gre_score = gre;
        profile.toefl_score = toefl;
        profile.ielts_score = ielts;
        profile
    }
}

proptest! {
    #[test]
    fn in_range_scores_always_validate(profile in arb_profile()) {
        prop_assert!(profile.validate().is_ok());
    }

    #[test]
    fn field_presence_matches_options(profile in arb_profile()) {
        prop_assert_eq!(profile.has_field("gpa"), profile.gpa.is_some());
        prop_assert_eq!(profile.has_field("gre_score"), profile.gre_score.is_some());
        prop_assert_eq!(profile.has_field("toefl_score"), profile.toefl_score.is_some());
        prop_assert_eq!(profile.has_field("ielts_score"), profile.ielts_score.is_some());
    }

    #[test]
    fn gre_above_range_never_validates(gre in 341..1000i32) {
        let mut profile = ApplicantProfile::new("Test Applicant", "test@example.com");
        profile.gre_score = Some(gre);
        prop_assert!(profile.validate().is_err());
    }
}
