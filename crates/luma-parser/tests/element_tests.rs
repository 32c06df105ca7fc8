//! Tests for the source-element positions recorded during parsing.

use luma_common::{ElementKind, Span, SourceElement};
use luma_parser::parse_block;

fn elements(source: &str) -> Vec<SourceElement> {
    parse_block(source).expect("parse failure").elements
}

#[test]
fn assignment_elements() {
    let elements = elements("testVar = 'hello' .. 42");
    assert_eq!(elements.len(), 3);
    assert_eq!(elements[0].kind, ElementKind::Variable);
    assert_eq!(elements[0].span, Span::new(0, 7));
    assert_eq!(elements[1].kind, ElementKind::LiteralString);
    assert_eq!(elements[1].span, Span::new(10, 17));
    assert_eq!(elements[2].kind, ElementKind::Numeral);
    assert_eq!(elements[2].span, Span::new(21, 23));
}

#[test]
fn goto_records_only_the_keyword() {
    let elements = elements("goto toto");
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].kind, ElementKind::Keyword);
    assert_eq!(elements[0].span, Span::new(0, 4));
}

#[test]
fn keywords_cover_the_full_word() {
    let elements = elements("do end");
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].span, Span::new(0, 2));
    assert_eq!(elements[1].span, Span::new(3, 6));
}

#[test]
fn dotted_variable_is_one_element() {
    let elements = elements("t.a.b = 1");
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].kind, ElementKind::Variable);
    assert_eq!(elements[0].span, Span::new(0, 5));
    assert_eq!(elements[1].kind, ElementKind::Numeral);
    assert_eq!(elements[1].span, Span::new(8, 9));
}

#[test]
fn variable_element_stops_at_first_call() {
    let elements = elements("x = f(y).z");
    let variables: Vec<Span> = elements
        .iter()
        .filter(|element| element.kind == ElementKind::Variable)
        .map(|element| element.span)
        .collect();
    // `x`, `f` up to its call, `y` inside the arguments
    assert_eq!(variables, vec![Span::new(0, 1), Span::new(4, 5), Span::new(6, 7)]);
}

#[test]
fn string_call_argument_is_recorded() {
    let elements = elements("print 'hi'");
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].kind, ElementKind::Variable);
    assert_eq!(elements[0].span, Span::new(0, 5));
    assert_eq!(elements[1].kind, ElementKind::LiteralString);
    assert_eq!(elements[1].span, Span::new(6, 10));
}

#[test]
fn elements_are_sorted_by_position() {
    let elements = elements("while a < 10 do a = a + 1 end");
    let mut begins: Vec<u32> = elements.iter().map(|element| element.span.begin).collect();
    let sorted = begins.clone();
    begins.sort_unstable();
    assert_eq!(begins, sorted);
}
