//! Property-based tests for preflight using proptest.
//!
//! These verify coercion invariants and the collect-all-errors guarantee
//! for all possible inputs, not just hand-picked examples.

use std::collections::BTreeMap;

use proptest::prelude::*;

use preflight::prelude::*;
use preflight::validators::run_validator;

fn run_builtin(
    schema: Schema,
    env: &BTreeMap<String, String>,
) -> Result<Vec<ResolvedVar>, EnvErrors> {
    run_validator(&ValidatorOptions::Builtin(schema), env)
}

proptest! {
    /// Every i64 round-trips through the number validator.
    #[test]
    fn number_accepts_every_integer(n in any::<i64>()) {
        let result = schema::number()
            .validate("APP_N", Some(&n.to_string()))
            .unwrap();
        prop_assert_eq!(result, Some(Value::Integer(n)));
    }

    /// Every finite f64 is accepted by the number validator.
    #[test]
    fn number_accepts_every_finite_float(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        let result = schema::number().validate("APP_F", Some(&f.to_string()));
        prop_assert!(result.is_ok());
    }

    /// Non-numeric strings always fail the number validator with the
    /// invalid-value code.
    #[test]
    fn number_rejects_non_numeric(s in "[a-zA-Z][a-zA-Z ]{0,20}") {
        let err = schema::number().validate("APP_N", Some(&s)).unwrap_err();
        prop_assert_eq!(err.code(), preflight::ErrorCode::InvalidEnvValue);
    }

    /// Strings outside the fixed recognized sets always fail the boolean
    /// validator.
    #[test]
    fn boolean_rejects_everything_outside_the_sets(
        s in "[a-zA-Z0-9]{1,12}".prop_filter(
            "not a recognized boolean",
            |s| !["0", "1", "true", "false"].contains(&s.as_str()),
        )
    ) {
        prop_assert!(schema::boolean().validate("APP_B", Some(&s)).is_err());
    }

    /// The string validator passes every non-empty value through
    /// unchanged when no format is requested.
    #[test]
    fn string_is_identity_without_format(s in ".{1,40}") {
        let result = schema::string().validate("APP_S", Some(&s)).unwrap();
        prop_assert_eq!(result, Some(Value::String(s)));
    }

    /// Optional variants uniformly yield the absent sentinel for
    /// missing and empty input.
    #[test]
    fn optional_variants_skip_absent(empty in prop_oneof![Just(None), Just(Some(""))]) {
        prop_assert_eq!(schema::string().optional().validate("K", empty).unwrap(), None);
        prop_assert_eq!(schema::number().optional().validate("K", empty).unwrap(), None);
        prop_assert_eq!(schema::boolean().optional().validate("K", empty).unwrap(), None);
        prop_assert_eq!(
            schema::one_of(["a", "b"]).optional().validate("K", empty).unwrap(),
            None
        );
    }

    /// A member of the choice list always passes one_of.
    #[test]
    fn one_of_accepts_every_member(idx in 0usize..3) {
        let choices = ["alpha", "beta", "gamma"];
        let result = schema::one_of(choices)
            .validate("APP_C", Some(choices[idx]))
            .unwrap();
        prop_assert_eq!(result, Some(Value::String(choices[idx].to_string())));
    }

    /// The adapter reports exactly one failure per missing required key,
    /// never stopping early.
    #[test]
    fn collect_all_reports_every_missing_key(count in 1usize..12) {
        let mut schema = Schema::new();
        for i in 0..count {
            schema.insert(format!("APP_VAR_{:02}", i), schema::string());
        }

        let errors = run_builtin(schema, &BTreeMap::new()).unwrap_err();
        prop_assert_eq!(errors.len(), count);
    }

    /// Successful keys and failing keys partition the schema: their
    /// counts always sum to the number of required keys.
    #[test]
    fn successes_and_failures_partition_required_keys(present in prop::collection::btree_set(0usize..10, 0..10)) {
        let total = 10usize;
        let mut schema = Schema::new();
        let mut env = BTreeMap::new();
        for i in 0..total {
            let key = format!("APP_VAR_{:02}", i);
            schema.insert(&key, schema::string());
            if present.contains(&i) {
                env.insert(key, "value".to_string());
            }
        }

        match run_builtin(schema, &env) {
            Ok(entries) => prop_assert_eq!(entries.len(), total),
            Err(errors) => {
                prop_assert_eq!(errors.len() + present.len(), total);
            }
        }
    }

    /// Define-table values are valid JSON documents.
    #[test]
    fn define_values_are_valid_json(s in "[a-zA-Z0-9 _-]{0,30}") {
        let literal = Value::String(s).to_json_literal();
        prop_assert!(serde_json::from_str::<serde_json::Value>(&literal).is_ok());
    }
}
