//! End-to-end rendering of realistic `.env.template` files.

use envbuild_core::{EscapePolicy, Environment, Parameter, UnresolvedPolicy};
use envbuild_renderer::{render, RenderContext, RenderOptions, Renderer};
use rstest::rstest;

const TEMPLATE: &str = "\
# generated for %ENV%
APP_ENV=%ENV%
DB_HOST=%DB_HOST%
DB_PORT=%DB_PORT%
REDIS_URL=%cache/REDIS_URL%
SENTRY_DSN=%SENTRY_DSN%
";

fn env(name: &str) -> Environment {
    Environment::parse(name).expect("environment")
}

fn dev_parameters() -> Vec<Parameter> {
    vec![
        Parameter::new("/dev/DB_HOST", "db.dev.internal\n"),
        Parameter::new("/dev/DB_PORT", "  5432  "),
        Parameter::new("/dev/cache/REDIS_URL", "redis://cache:6379/0"),
        Parameter::new("/dev/UNUSED_FLAG", "true"),
    ]
}

// ---------------------------------------------------------------------------
// 1. Basic substitution
// ---------------------------------------------------------------------------

#[test]
fn full_template_renders() {
    let out = render(&env("dev"), TEMPLATE, &dev_parameters()).expect("render");
    assert_eq!(
        out,
        "\
# generated for \"dev\"
APP_ENV=\"dev\"
DB_HOST=\"db.dev.internal\"
DB_PORT=\"5432\"
REDIS_URL=\"redis://cache:6379/0\"
SENTRY_DSN=%SENTRY_DSN%
"
    );
}

#[rstest]
#[case("")]
#[case("PLAIN=value\n")]
#[case("RATIO=50% of 100%\n")]
#[case("# comment with %% and % spaces %\n")]
fn templates_without_tokens_are_unchanged(#[case] template: &str) {
    let out = render(&env("dev"), template, &dev_parameters()).expect("render");
    assert_eq!(out, template);
}

#[test]
fn empty_parameter_list_only_resolves_env() {
    let out = render(&env("prod"), "A=%ENV%\nB=%DB_HOST%\n", &[]).expect("render");
    assert_eq!(out, "A=\"prod\"\nB=%DB_HOST%\n");
}

#[test]
fn other_environment_parameters_do_not_leak() {
    let params = vec![
        Parameter::new("/prod/DB_HOST", "prod-db"),
        Parameter::new("/dev/DB_HOST", "dev-db"),
    ];
    let out = render(&env("dev"), "DB_HOST=%DB_HOST%", &params).expect("render");
    assert_eq!(out, "DB_HOST=\"dev-db\"");
}

// ---------------------------------------------------------------------------
// 2. Order independence
// ---------------------------------------------------------------------------

#[test]
fn result_does_not_depend_on_parameter_order() {
    let template = "%A%|%AB%|%B%";
    let forward = vec![
        Parameter::new("/dev/A", "1"),
        Parameter::new("/dev/AB", "2"),
        Parameter::new("/dev/B", "3"),
    ];
    let mut reversed = forward.clone();
    reversed.reverse();

    let a = render(&env("dev"), template, &forward).expect("forward");
    let b = render(&env("dev"), template, &reversed).expect("reversed");
    assert_eq!(a, "\"1\"|\"2\"|\"3\"");
    assert_eq!(a, b);
}

#[test]
fn inserted_values_are_not_rescanned() {
    let params = vec![
        Parameter::new("/dev/FIRST", "%SECOND%"),
        Parameter::new("/dev/SECOND", "boom"),
    ];
    let out = render(&env("dev"), "X=%FIRST%", &params).expect("render");
    assert_eq!(out, "X=\"%SECOND%\"");
}

#[test]
fn env_value_containing_token_shape_stays_literal() {
    let params = vec![Parameter::new("/dev/GREETING", "hello %ENV%")];
    let out = render(&env("dev"), "G=%GREETING%", &params).expect("render");
    assert_eq!(out, "G=\"hello %ENV%\"");
}

// ---------------------------------------------------------------------------
// 3. Reporting
// ---------------------------------------------------------------------------

#[test]
fn report_lists_unresolved_and_unused() {
    let ctx = RenderContext::new(&env("dev"), &dev_parameters());
    let rendered = Renderer::default().render(&ctx, TEMPLATE).expect("render");
    assert_eq!(rendered.unresolved, ["SENTRY_DSN"]);
    assert_eq!(rendered.unused, ["UNUSED_FLAG"]);
}

#[test]
fn strict_rendering_fails_on_missing_token() {
    let ctx = RenderContext::new(&env("dev"), &dev_parameters());
    let strict = Renderer::new(RenderOptions {
        escape: EscapePolicy::Escape,
        unresolved: UnresolvedPolicy::Fail,
    });
    let err = strict.render(&ctx, TEMPLATE).unwrap_err();
    assert!(err.to_string().contains("SENTRY_DSN"), "got: {err}");
}

#[test]
fn rendering_is_deterministic() {
    let params = dev_parameters();
    let first = render(&env("dev"), TEMPLATE, &params).expect("first");
    let second = render(&env("dev"), TEMPLATE, &params).expect("second");
    assert_eq!(first.as_bytes(), second.as_bytes());
}
