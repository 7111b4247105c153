//! Property-based tests for the parser.
//!
//! Run with: cargo test -p fxql-parser --test `property_tests`

use fxql_core::{
    format_statement, format_statements, Amount, FormatConfig, Statement, DEFAULT_CURRENCIES,
};
use fxql_parser::{normalize, parse_batch, parse_statement, ParseOptions};
use proptest::prelude::*;
use rust_decimal::Decimal;

// ============================================================================
// Arbitrary generators
// ============================================================================

fn arb_currency() -> impl Strategy<Value = String> {
    prop::sample::select(DEFAULT_CURRENCIES.to_vec()).prop_map(str::to_string)
}

fn arb_amount() -> impl Strategy<Value = Amount> {
    (0i64..100_000_000i64, 0u32..8u32).prop_map(|(n, scale)| Amount::new(Decimal::new(n, scale)))
}

fn arb_cap() -> impl Strategy<Value = Amount> {
    (0u64..10_000_000u64).prop_map(|n| Amount::new(Decimal::from(n)))
}

/// Statements with at least one command.
fn arb_statement() -> impl Strategy<Value = Statement> {
    (
        arb_currency(),
        arb_currency(),
        prop::option::of(arb_amount()),
        prop::option::of(arb_amount()),
        prop::option::of(arb_cap()),
    )
        .prop_filter("statement needs a command", |(_, _, buy, sell, cap)| {
            buy.is_some() || sell.is_some() || cap.is_some()
        })
        .prop_map(|(base, quote, buy, sell, cap)| Statement {
            base_currency: base,
            quote_currency: quote,
            buy,
            sell,
            cap,
        })
}

/// Fragments that always fail, each for a different reason.
fn arb_bad_fragment() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "XYZ-USD { BUY 1 }",
        "USD-GBP { }",
        "USD-GBP { BUY 1 BUY 2 }",
        "USD-GBP { CAP 10.5 }",
        "USD-GBP { SELL -3 }",
        "usd-GBP { BUY 1 }",
        "USD-GBP { RATE 1 }",
        "USD-GBP { BUY 1.2.3 }",
        "USD-GBP { BUY @1 }",
    ])
    .prop_map(str::to_string)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn formatted_statement_parses_back(stmt in arb_statement(), indent in 0usize..4) {
        let text = format_statement(&stmt, &FormatConfig::with_indent(indent));
        let fragments = normalize(&text);
        prop_assert_eq!(fragments.len(), 1);

        let parsed = parse_statement(&fragments[0], &ParseOptions::default());
        prop_assert_eq!(parsed, Ok(stmt));
    }

    #[test]
    fn formatted_batch_parses_back(stmts in prop::collection::vec(arb_statement(), 0..20)) {
        let text = format_statements(&stmts, &FormatConfig::default());
        let result = parse_batch(&text);
        prop_assert!(result.is_ok());
        prop_assert_eq!(result.statements, stmts);
    }

    #[test]
    fn failures_never_swallow_neighbours(
        layout in prop::collection::vec(
            prop_oneof![
                arb_statement().prop_map(Ok::<Statement, String>),
                arb_bad_fragment().prop_map(Err::<Statement, String>),
            ],
            0..30,
        )
    ) {
        let mut source = String::new();
        let mut expected_good = Vec::new();
        let mut expected_bad = 0usize;
        for item in &layout {
            match item {
                Ok(stmt) => {
                    source.push_str(&format_statement(stmt, &FormatConfig::default()));
                    expected_good.push(stmt.clone());
                }
                Err(fragment) => {
                    source.push_str(fragment);
                    source.push('\n');
                    expected_bad += 1;
                }
            }
        }

        let result = parse_batch(&source);
        prop_assert_eq!(result.failures.len(), expected_bad);
        prop_assert_eq!(result.statements, expected_good);
    }

    #[test]
    fn normalized_fragments_are_single_line(input in "[A-Z{} \\n\\t#0-9.-]{0,200}") {
        for fragment in normalize(&input) {
            prop_assert!(!fragment.contains('\n'));
            prop_assert!(!fragment.contains("  "));
            prop_assert!(!fragment.is_empty());
        }
    }

    #[test]
    fn parser_never_panics(input in "\\PC{0,120}") {
        let result = parse_batch(&input);
        for failure in &result.failures {
            prop_assert!(failure.error.position.line >= 1);
            prop_assert!(failure.error.position.column >= 1);
        }
    }
}
