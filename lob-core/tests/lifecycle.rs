mod common;

use lob_core::prelude::*;

#[test]
fn new_limit_order_rests_live() {
    let mut book = Book::new();
    book.add_limit_order(1, Side::Buy, 10, 100);

    assert_eq!(book.search_order(1).unwrap().state(), OrderState::RestingLive);
}

#[test]
fn new_stop_order_rests_as_stop() {
    let mut book = Book::new();
    book.add_stop_order(1, Side::Buy, 10, 105);

    assert_eq!(book.search_order(1).unwrap().state(), OrderState::RestingStop);
}

#[test]
fn full_fill_removes_both_sides_from_the_index() {
    let mut book = Book::new();
    book.add_limit_order(1, Side::Sell, 10, 100);
    book.add_limit_order(2, Side::Buy, 10, 100);

    assert!(book.search_order(1).is_none());
    assert!(book.search_order(2).is_none());
}

#[test]
fn cancel_removes_the_order_from_the_index() {
    let mut book = Book::new();
    book.add_limit_order(1, Side::Buy, 10, 100);
    book.cancel_limit_order(1);

    assert!(book.search_order(1).is_none());
}

#[test]
fn triggered_stop_market_transitions_straight_to_filled() {
    let mut book = Book::new();
    book.add_limit_order(1, Side::Sell, 10, 100);
    book.add_stop_order(2, Side::Buy, 10, 100);

    // Fully filled on the spot: never observed resting at all.
    assert!(book.search_order(2).is_none());
}

#[test]
fn triggered_stop_limit_transitions_to_resting_live_on_partial_fill() {
    let mut book = Book::new();
    book.add_limit_order(1, Side::Sell, 4, 100);
    book.add_stop_limit_order(2, Side::Buy, 10, 100, 100);

    let resting = book.search_order(2).expect("residual rests live");
    assert_eq!(resting.state(), OrderState::RestingLive);
    assert_eq!(resting.shares, 6);
}
