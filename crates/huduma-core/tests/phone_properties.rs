use huduma_core::domain::phone::{format_phone_display, normalize_phone, CANONICAL_LEN};
use proptest::prelude::*;

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in ".{0,20}") {
        let once = normalize_phone(Some(&raw));
        let twice = normalize_phone(Some(&once));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn canonical_numbers_are_fixed_points(canonical in "254[71][0-9]{8}") {
        prop_assert_eq!(normalize_phone(Some(&canonical)), canonical);
    }

    #[test]
    fn normalize_is_idempotent_on_local_numbers(raw in "0?[71][0-9]{8}") {
        let once = normalize_phone(Some(&raw));
        prop_assert_eq!(once.len(), CANONICAL_LEN);
        prop_assert_eq!(normalize_phone(Some(&once)), once);
    }

    #[test]
    fn leading_ones_keep_the_last_nine_digits(ones in "1{1,4}", local in "[71][0-9]{8}") {
        let raw = format!("{ones}{local}");
        prop_assert_eq!(normalize_phone(Some(&raw)), format!("254{local}"));
    }

    #[test]
    fn normalize_output_is_empty_or_canonical(raw in "[0-9 +()-]{0,16}") {
        let out = normalize_phone(Some(&raw));
        if !out.is_empty() {
            prop_assert_eq!(out.len(), CANONICAL_LEN);
            prop_assert!(out.starts_with("2547") || out.starts_with("2541"));
            prop_assert!(out.chars().all(|ch| ch.is_ascii_digit()));
        }
    }

    #[test]
    fn nine_digit_local_numbers_gain_country_code(lead in "[71]", rest in "[0-9]{8}") {
        let local = format!("{lead}{rest}");
        prop_assert_eq!(normalize_phone(Some(&local)), format!("254{local}"));
    }

    #[test]
    fn leading_zero_local_numbers_gain_country_code(lead in "[71]", rest in "[0-9]{8}") {
        let local = format!("{lead}{rest}");
        prop_assert_eq!(normalize_phone(Some(&format!("0{local}"))), format!("254{local}"));
    }

    #[test]
    fn canonical_numbers_display_in_four_groups(lead in "[71]", rest in "[0-9]{8}") {
        let canonical = format!("254{lead}{rest}");
        let display = format_phone_display(&canonical);
        let groups: Vec<&str> = display.split(' ').collect();
        prop_assert_eq!(groups.len(), 4);
        prop_assert_eq!(groups[0], "+254");
        prop_assert_eq!(groups[1].len(), 3);
        prop_assert_eq!(groups[2].len(), 3);
        prop_assert_eq!(groups[3].len(), 3);
    }
}
