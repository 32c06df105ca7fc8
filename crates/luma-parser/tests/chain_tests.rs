//! Tests for the restricted chain-expression grammar.

use luma_parser::ast::PrefixItem;
use luma_parser::parse_chain;

#[test]
fn chain_single_name() {
    let parsed = parse_chain("foobar");
    let chain = parsed.chain.expect("chain");
    assert_eq!(chain.start.text, "foobar");
    assert!(chain.items.is_empty());
    assert!(chain.method.is_none());
    assert_eq!(parsed.consumed, 6);
}

#[test]
fn chain_member_access() {
    let parsed = parse_chain("first.second.third");
    let chain = parsed.chain.expect("chain");
    assert_eq!(chain.start.text, "first");
    assert_eq!(chain.items.len(), 2);
    assert!(matches!(&chain.items[0], PrefixItem::Member(name) if name.text == "second"));
    assert!(matches!(&chain.items[1], PrefixItem::Member(name) if name.text == "third"));
    assert_eq!(parsed.consumed, 18);
}

#[test]
fn chain_trailing_method_reference() {
    let parsed = parse_chain("first.second:third");
    let chain = parsed.chain.expect("chain");
    assert_eq!(chain.items.len(), 1);
    assert_eq!(chain.method.as_ref().map(|m| m.text.as_str()), Some("third"));
    assert_eq!(parsed.consumed, 18);
}

#[test]
fn chain_method_call_with_arguments() {
    let parsed = parse_chain("foo:bar(1, 'x')");
    let chain = parsed.chain.expect("chain");
    assert_eq!(chain.items.len(), 1);
    match &chain.items[0] {
        PrefixItem::MethodCall(name, arguments) => {
            assert_eq!(name.text, "bar");
            assert_eq!(arguments.len(), 2);
        }
        other => panic!("unexpected item {other:?}"),
    }
    assert!(chain.method.is_none());
    assert_eq!(parsed.consumed, 15);
}

#[test]
fn chain_calls_and_indexes() {
    let parsed = parse_chain("foo[x]:bar(42).test");
    let chain = parsed.chain.expect("chain");
    assert_eq!(chain.items.len(), 3);
    assert!(matches!(&chain.items[0], PrefixItem::Index(_)));
    assert!(matches!(&chain.items[1], PrefixItem::MethodCall(name, _) if name.text == "bar"));
    assert!(matches!(&chain.items[2], PrefixItem::Member(name) if name.text == "test"));
    assert_eq!(parsed.consumed, 19);
}

#[test]
fn chain_with_interior_whitespace() {
    let parsed = parse_chain("foo . bar");
    let chain = parsed.chain.expect("chain");
    assert_eq!(chain.items.len(), 1);
    assert_eq!(parsed.consumed, 9);
}

#[test]
fn chain_stops_at_non_chain_token() {
    let parsed = parse_chain("foo.bar baz");
    assert!(parsed.chain.is_some());
    assert_eq!(parsed.consumed, 7);

    let parsed = parse_chain("foo.bar = 1");
    assert!(parsed.chain.is_some());
    assert_eq!(parsed.consumed, 7);
}

#[test]
fn chain_requires_leading_name() {
    assert!(parse_chain("").chain.is_none());
    assert!(parse_chain(".foo").chain.is_none());
    assert!(parse_chain("42").chain.is_none());
    assert!(parse_chain("(foo).bar").chain.is_none());
}

#[test]
fn chain_with_malformed_suffix_is_rejected() {
    assert!(parse_chain("foo.").chain.is_none());
    assert!(parse_chain("foo[1").chain.is_none());
    assert!(parse_chain("foo(").chain.is_none());
}
