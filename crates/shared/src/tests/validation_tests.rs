use super::*;

#[test]
fn phone_accepts_only_the_regional_pattern() {
    assert!(validate_phone("(11) 91234-5678").is_empty());
    assert!(validate_phone("(21) 99999-0000").is_empty());

    for bad in [
        "(11)91234-5678",
        "(11) 9123-5678",
        "(11) 912345-678",
        "(1) 91234-5678",
        "11 91234-5678",
        "(11) 91234 5678",
        "(11) 91234-56789",
        "(11)  91234-5678",
        "(11)\t91234-5678",
        "x(11) 91234-5678",
        "(aa) bbbbb-cccc",
    ] {
        assert_eq!(
            validate_phone(bad),
            vec![FieldError::InvalidPhone],
            "expected {bad:?} to be rejected"
        );
    }
}

#[test]
fn phone_rejects_non_ascii_digits() {
    assert!(!is_valid_phone("(١١) 91234-5678"));
}

#[test]
fn empty_fields_report_required_only() {
    assert_eq!(validate_name(""), vec![FieldError::Required]);
    assert_eq!(validate_email(""), vec![FieldError::Required]);
    assert_eq!(validate_phone(""), vec![FieldError::Required]);
}

#[test]
fn name_length_bounds_are_inclusive() {
    assert_eq!(
        validate_name("ABC"),
        vec![FieldError::TooShort { min: NAME_MIN_CHARS }]
    );
    assert_eq!(
        validate_name("1234567"),
        vec![FieldError::TooShort { min: NAME_MIN_CHARS }]
    );
    assert!(validate_name("12345678").is_empty());
    assert!(validate_name("Maria Silva").is_empty());
    assert!(validate_name(&"a".repeat(NAME_MAX_CHARS)).is_empty());
    assert_eq!(
        validate_name(&"a".repeat(NAME_MAX_CHARS + 1)),
        vec![FieldError::TooLong { max: NAME_MAX_CHARS }]
    );
}

#[test]
fn name_length_counts_characters_not_bytes() {
    // 8 characters, 10 bytes.
    assert!(validate_name("João Sáo").is_empty());
    assert_eq!(
        validate_name("João"),
        vec![FieldError::TooShort { min: NAME_MIN_CHARS }]
    );
}

#[test]
fn email_requires_at_sign_and_domain() {
    assert!(validate_email("maria@x.com").is_empty());
    assert!(validate_email("first.last+tag@sub.example.org").is_empty());

    for bad in [
        "maria",
        "maria@",
        "@x.com",
        "maria@@x.com",
        "maria@x..com",
        "maria@-x.com",
        "maria x@x.com",
        ".maria@x.com",
    ] {
        assert_eq!(
            validate_email(bad),
            vec![FieldError::InvalidEmail],
            "expected {bad:?} to be rejected"
        );
    }
}

#[test]
fn email_enforces_length_limits() {
    let long_local = format!("{}@x.com", "a".repeat(EMAIL_LOCAL_MAX_CHARS + 1));
    assert!(!is_valid_email(&long_local));

    let label = "a".repeat(60);
    let long_total = format!("me@{label}.{label}.{label}.{label}.{label}.com");
    assert!(long_total.len() > EMAIL_MAX_CHARS);
    assert!(!is_valid_email(&long_total));
}

#[test]
fn field_errors_render_readable_messages() {
    assert_eq!(
        FieldError::TooShort { min: 8 }.to_string(),
        "must have at least 8 characters"
    );
    let mut errors = crate::error::ValidationErrors::new();
    errors.push("name", FieldError::Required);
    errors.push("phone", FieldError::InvalidPhone);
    assert_eq!(
        errors.to_string(),
        "name: value is required; phone: must match (DD) DDDDD-DDDD"
    );
}
