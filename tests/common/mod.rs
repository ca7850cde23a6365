#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use trict::{Map, Node};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        if let Err(e) = tracing_subscriber::registry()
            .with(fmt::layer().with_test_writer().with_filter(env_filter))
            .try_init()
        {
            eprintln!("Error: Failed to set up logging: {}", e);
        }
    });
}

pub fn leaf(value: &'static str) -> Node<&'static str> {
    Node::Leaf(value)
}

pub fn map<const N: usize>(entries: [(&str, Node<&'static str>); N]) -> Node<&'static str> {
    Node::Map(
        entries
            .into_iter()
            .map(|(key, node)| (key.to_string(), node))
            .collect(),
    )
}

pub fn root<const N: usize>(entries: [(&str, Node<&'static str>); N]) -> Map<&'static str> {
    match map(entries) {
        Node::Map(root) => root,
        Node::Leaf(_) => unreachable!(),
    }
}

/// {user: {information: {attribute, another_attribute}, moreinformation}}
pub fn base_tree() -> Map<&'static str> {
    root([(
        "user",
        map([
            (
                "information",
                map([
                    ("attribute", leaf("infonugget")),
                    ("another_attribute", leaf("secondnugget")),
                ]),
            ),
            ("moreinformation", leaf("extranugget")),
        ]),
    )])
}

/// Same as `base_tree` but with a key containing ".".
pub fn invalid_base_tree() -> Map<&'static str> {
    root([(
        "user",
        map([
            (
                "information",
                map([
                    ("attr.ibute", leaf("infonugget")),
                    ("another_attribute", leaf("secondnugget")),
                ]),
            ),
            ("moreinformation", leaf("extranugget")),
        ]),
    )])
}
