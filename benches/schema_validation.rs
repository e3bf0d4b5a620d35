//! Performance benchmarks for schema validation.
//!
//! Compares manual imperative parsing against the schema-driven
//! validation pass over a representative ten-variable environment.

use criterion::{criterion_group, criterion_main, Criterion};
use std::collections::BTreeMap;
use std::hint::black_box;

use preflight::prelude::*;
use preflight::validators::run_validator;

fn sample_env() -> BTreeMap<String, String> {
    [
        ("APP_NAME", "bench"),
        ("APP_PORT", "8080"),
        ("APP_WORKERS", "4"),
        ("APP_DEBUG", "false"),
        ("APP_MODE", "production"),
        ("APP_HOST", "api.example.com"),
        ("APP_MAIL", "ops@example.com"),
        ("APP_URL", "https://example.com"),
        ("APP_TIMEOUT", "2.5"),
        ("APP_RETRIES", "3"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn build_schema() -> Schema {
    Schema::new()
        .with("APP_NAME", schema::string())
        .with("APP_PORT", schema::number())
        .with("APP_WORKERS", schema::number())
        .with("APP_DEBUG", schema::boolean())
        .with("APP_MODE", schema::one_of(["development", "production"]))
        .with("APP_HOST", schema::string().format(Format::Host))
        .with("APP_MAIL", schema::string().format(Format::Email))
        .with("APP_URL", schema::string().format(Format::Url))
        .with("APP_TIMEOUT", schema::number())
        .with("APP_RETRIES", schema::number().optional())
}

/// Baseline: hand-written parsing of the same ten variables.
fn manual_parse(env: &BTreeMap<String, String>) -> Result<(), String> {
    let _name = env.get("APP_NAME").ok_or("APP_NAME is required")?;
    let _port: u16 = env
        .get("APP_PORT")
        .ok_or("APP_PORT is required")?
        .parse()
        .map_err(|_| "APP_PORT must be a number")?;
    let _workers: u32 = env
        .get("APP_WORKERS")
        .ok_or("APP_WORKERS is required")?
        .parse()
        .map_err(|_| "APP_WORKERS must be a number")?;
    let _debug = matches!(
        env.get("APP_DEBUG").map(String::as_str),
        Some("1") | Some("true") | Some("0") | Some("false")
    )
    .then_some(())
    .ok_or("APP_DEBUG must be a boolean")?;
    let mode = env.get("APP_MODE").ok_or("APP_MODE is required")?;
    if mode != "development" && mode != "production" {
        return Err("APP_MODE must be development or production".to_string());
    }
    let _host = env.get("APP_HOST").ok_or("APP_HOST is required")?;
    let _mail = env.get("APP_MAIL").ok_or("APP_MAIL is required")?;
    let _url = env.get("APP_URL").ok_or("APP_URL is required")?;
    let _timeout: f64 = env
        .get("APP_TIMEOUT")
        .ok_or("APP_TIMEOUT is required")?
        .parse()
        .map_err(|_| "APP_TIMEOUT must be a number")?;
    let _retries: Option<u32> = env.get("APP_RETRIES").and_then(|v| v.parse().ok());
    Ok(())
}

fn bench_validation(c: &mut Criterion) {
    let env = sample_env();

    c.bench_function("manual_parse_10_vars", |b| {
        b.iter(|| manual_parse(black_box(&env)))
    });

    c.bench_function("schema_validate_10_vars", |b| {
        let schema = build_schema();
        let options = ValidatorOptions::Builtin(schema);
        b.iter(|| run_validator(black_box(&options), black_box(&env)))
    });

    c.bench_function("schema_validate_all_failures", |b| {
        let options = ValidatorOptions::Builtin(build_schema());
        let empty = BTreeMap::new();
        b.iter(|| run_validator(black_box(&options), black_box(&empty)))
    });
}

criterion_group!(benches, bench_validation);
criterion_main!(benches);
