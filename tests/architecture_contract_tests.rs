//! Architecture contract tests.

mod support;

use support::architecture::{find_lines_containing, read_relative};

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::port",
            "tokio::",
            "reqwest::",
            "diesel::",
            "teloxide::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn ports_depend_only_on_domain_and_errors() {
    let hits = find_lines_containing(
        "src/port",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
        ],
    );

    assert!(hits.is_empty(), "found outer-layer imports in ports: {hits:#?}");
}

#[test]
fn application_layer_has_no_direct_adapter_imports() {
    let hits = find_lines_containing(
        "src/application",
        &["crate::adapter::", "crate::infrastructure::", "reqwest::", "diesel::", "teloxide::"],
    );

    assert!(
        hits.is_empty(),
        "application layer should not import adapters directly: {hits:#?}"
    );
}

#[test]
fn only_the_telegram_adapter_and_bootstrap_touch_teloxide() {
    let hits: Vec<_> = find_lines_containing("src", &["teloxide::"])
        .into_iter()
        .filter(|(path, _, _)| {
            !path.starts_with("src/adapter/outbound/notifier/telegram/")
                && path != "src/infrastructure/bootstrap.rs"
        })
        .collect();

    assert!(hits.is_empty(), "teloxide used outside its adapter: {hits:#?}");
}

#[test]
fn telegram_modules_are_feature_gated() {
    let notifier = read_relative("src/adapter/outbound/notifier/mod.rs");
    assert!(
        notifier.contains("#[cfg(feature = \"telegram\")]\npub mod telegram;"),
        "telegram notifier module should be behind the `telegram` feature"
    );
}
