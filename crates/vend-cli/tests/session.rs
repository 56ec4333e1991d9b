//! End-to-end sessions driven through an in-memory console.

use std::io::Cursor;
use std::sync::Arc;
use vend_cli::{Console, Session, SessionEnd, SessionSummary};
use vend_core::{Catalog, CatalogConfig, Category, Language, LocalizationTable, Price, ProductEntry};

struct Run {
    summary: SessionSummary,
    catalog: Catalog,
    transcript: String,
}

fn run_with_table(
    table: LocalizationTable,
    config: CatalogConfig,
    input: &str,
    preselected: Option<Language>,
) -> Run {
    let console = Console::new(Cursor::new(input.to_string()), Vec::new());
    let mut session = Session::new(console, Arc::new(table), config).unwrap();
    let summary = session.run(preselected).unwrap();
    let catalog = session.catalog().clone();
    let transcript = String::from_utf8(session.into_terminal().into_output()).unwrap();
    Run {
        summary,
        catalog,
        transcript,
    }
}

fn run(config: CatalogConfig, input: &str) -> Run {
    run_with_table(LocalizationTable::builtin(), config, input, None)
}

fn single_juice() -> CatalogConfig {
    CatalogConfig {
        default_stock: 5,
        products: vec![ProductEntry::new("1", "orange_juice", 2.99, Category::Drinks).with_stock(1)],
        suggestions: Default::default(),
    }
}

#[test]
fn buy_once_and_leave() {
    let run = run(CatalogConfig::default(), "english\n1\n3.00\nno\nno\n");

    assert_eq!(run.summary.ended_by, SessionEnd::Declined);
    assert_eq!(run.summary.sales.len(), 1);
    assert_eq!(run.summary.revenue, Price::from_cents(299));
    assert_eq!(run.catalog.lookup("1").unwrap().stock, 4);

    assert!(run.transcript.starts_with("Welcome to Luna's Vending Machine!\n\n"));
    assert!(run.transcript.contains("Drinks category:"));
    assert!(run.transcript.contains("1: orange juice - $2.99 (Stock: 5)"));
    assert!(run.transcript.contains("Change returned: $0.01"));
    // catalog order, not suggestion-list order
    assert!(run
        .transcript
        .contains("Recommended add-ons:\n- chocolate bar ($2.75)\n- cookies ($1.75)\n"));
    assert_eq!(run.transcript.matches("Goodbye!").count(), 1);
    assert!(run.transcript.ends_with("Thank you for using Luna's Vending Machine. Goodbye!\n"));
}

#[test]
fn last_unit_then_sold_out() {
    let run = run(single_juice(), "english\n1\n3.00\nyes\n1\n");

    assert_eq!(run.summary.ended_by, SessionEnd::InputClosed);
    assert_eq!(run.summary.sales.len(), 1);
    assert_eq!(run.summary.sales[0].change, Price::from_cents(1));
    assert_eq!(run.catalog.lookup("1").unwrap().stock, 0);
    assert!(run.transcript.contains("Sorry, orange juice is SOLD OUT!"));
    assert_eq!(run.transcript.matches("Enter payment amount").count(), 1);
}

#[test]
fn insufficient_payment_is_retried() {
    let run = run(CatalogConfig::default(), "english\n6\n1.00\n2.00\nno\nno\n");

    assert!(run
        .transcript
        .contains("Insufficient payment. You need at least $1.50"));
    assert!(run.transcript.contains("Change returned: $0.50"));
    assert_eq!(run.summary.sales[0].paid, Price::from_cents(200));
}

#[test]
fn add_on_is_recorded_and_not_chained() {
    let run = run(CatalogConfig::default(), "english\n1\n5\nyes\n8\n1.75\nno\n");

    assert_eq!(run.summary.ended_by, SessionEnd::Declined);
    assert_eq!(run.summary.sales.len(), 2);
    assert!(run.summary.sales[1].add_on);
    assert_eq!(run.summary.revenue, Price::from_cents(299 + 175));
    assert_eq!(run.catalog.lookup("8").unwrap().stock, 4);
    assert_eq!(run.transcript.matches("Recommended add-ons:").count(), 1);
}

#[test]
fn arabic_session_after_invalid_language() {
    let run = run(CatalogConfig::default(), "french\nARABIC\n3\n2\nلا\nلا\n");

    assert!(run
        .transcript
        .contains("Invalid language choice. Please select either 'english' or 'arabic'."));
    assert!(run.transcript.contains("--- قائمة آلة البيع ---"));
    assert!(run.transcript.contains("جاري صرف ماء!"));
    assert!(run.transcript.contains("المبلغ المتبقي: $0.75"));
    assert!(run.transcript.ends_with("شكرًا لاستخدامك جهاز لونا للبيع. وداعًا!\n"));
    assert_eq!(run.summary.sales[0].name, "ماء");
}

#[test]
fn language_switch_resets_stock() {
    let run = run(
        CatalogConfig::default(),
        "english\n1\n3\nno\nyes\nlang\narabic\n",
    );

    assert_eq!(run.summary.ended_by, SessionEnd::InputClosed);
    assert_eq!(run.summary.sales.len(), 1);

    let juice = run.catalog.lookup("1").unwrap();
    assert_eq!(juice.stock, 5);
    assert_eq!(juice.name, "عصير برتقال");

    let after_switch = run.transcript.rsplit("(english/arabic)").next().unwrap();
    assert!(after_switch.contains("1: عصير برتقال - $2.99 (المخزون: 5)"));
}

#[test]
fn preselected_language_skips_prompt() {
    let run = run_with_table(
        LocalizationTable::builtin(),
        CatalogConfig::default(),
        "9\n2.50\nلا\nلا\n",
        Some(Language::Arabic),
    );

    assert!(!run.transcript.contains("(english/arabic)"));
    assert!(run.transcript.starts_with("!مرحباً بكم في آلة لونا للبيع\n"));
    assert_eq!(run.summary.sales[0].code, "9");
    assert_eq!(run.summary.ended_by, SessionEnd::Declined);
}

#[test]
fn empty_table_falls_back_to_keys() {
    let run = run_with_table(
        LocalizationTable::new(),
        CatalogConfig::default(),
        "english\n3\n1.25\nno\nno\n",
        None,
    );

    assert!(run.transcript.starts_with("welcome\n"));
    assert!(run.transcript.contains("3: water - $1.25 (stock)"));
    assert!(run.transcript.ends_with("thank_you\n"));
    assert_eq!(run.summary.sales.len(), 1);
}
