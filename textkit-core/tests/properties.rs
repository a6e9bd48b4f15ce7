//! Property tests for coercion defaults and the formatter fallback chain

use proptest::prelude::*;
use textkit_core::{
    args, coerce, format_inline, format_safely, global, CoerceError, Value,
};

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<u64>().prop_map(Value::UInt),
        any::<f64>().prop_map(Value::Float),
        any::<char>().prop_map(Value::Char),
        ".{0,12}".prop_map(Value::Str),
    ]
}

proptest! {
    #[test]
    fn format_safely_never_fails(
        template in proptest::option::of(".{0,40}"),
        args in proptest::collection::vec(arb_value(), 0..4),
    ) {
        let out = format_safely(template.as_deref(), &args);
        match format_inline(template.as_deref().unwrap_or_default(), &args) {
            Ok(strict) if template.is_some() => prop_assert_eq!(out, strict),
            _ => prop_assert_eq!(out, template.unwrap_or_default()),
        }
    }

    #[test]
    fn brace_free_templates_are_identity(template in "[^{}]{0,40}") {
        prop_assert_eq!(format_safely(Some(template.as_str()), &[]), template.clone());
        prop_assert_eq!(format_inline(&template, &[]).unwrap(), template);
    }

    #[test]
    fn integers_parse_their_display(n in any::<i64>()) {
        prop_assert_eq!(coerce::<i64>(Some(n.to_string().as_str())).unwrap(), n);
    }

    #[test]
    fn non_numeric_text_is_a_conversion_error(s in "[a-zA-Z]{1,10}") {
        let is_conversion_error = matches!(
            coerce::<i32>(Some(s.as_str())),
            Err(CoerceError::Conversion { .. })
        );
        prop_assert!(is_conversion_error);
    }

    #[test]
    fn unknown_names_are_missing_converters(s in ".{1,10}") {
        let result = global().coerce_named("no-such-type", Some(s.as_str()));
        let is_missing = matches!(result, Err(CoerceError::NoConverterFound { .. }));
        prop_assert!(is_missing);
    }

    #[test]
    fn display_placeholder_matches_value_display(v in arb_value()) {
        let expected = v.to_string();
        prop_assert_eq!(format_inline("{}", &[v]).unwrap(), expected);
    }
}

#[test]
fn insufficient_arguments_never_partially_substitute() {
    let out = format_safely(Some("{0} and {1}"), &args!["x"]);
    assert_eq!(out, "{0} and {1}");
    assert!(!out.contains('x'));
}
