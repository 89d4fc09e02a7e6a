//! The six concrete end-to-end scenarios, transcribed directly.

mod common;

use lob_core::prelude::*;

#[test]
fn scenario_1_basic_cross() {
    let mut book = Book::new();
    book.add_limit_order(1, Side::Sell, 10, 100);
    book.add_limit_order(2, Side::Sell, 5, 101);
    book.add_limit_order(3, Side::Buy, 12, 101);

    assert!(book.search_order(1).is_none());
    assert_eq!(book.search_order(2).unwrap().shares, 3);
    assert!(book.search_order(3).is_none());
    assert_eq!(book.best_bid_price(), 0);
    assert_eq!(book.best_ask_price(), 101);
    assert_eq!(book.sell_limits()[0].total_volume, 3);
    assert_eq!(book.executed_count(), 2);
}

#[test]
fn scenario_2_fifo_within_a_level() {
    let mut book = Book::new();
    book.add_limit_order(10, Side::Buy, 5, 50);
    book.add_limit_order(11, Side::Buy, 5, 50);
    book.add_limit_order(12, Side::Sell, 7, 50);

    assert!(book.search_order(10).is_none());
    assert_eq!(book.search_order(11).unwrap().shares, 3);
    assert!(book.search_order(12).is_none());
    assert_eq!(book.best_bid_price(), 50);
    let bid = &book.buy_limits()[0];
    assert_eq!((bid.size, bid.total_volume), (1, 3));
}

#[test]
fn scenario_3_reprice_loses_time_priority() {
    let mut book = Book::new();
    book.add_limit_order(20, Side::Buy, 5, 50);
    book.add_limit_order(21, Side::Buy, 5, 50);

    // The unchanged-price case is implementation-defined per §9; the
    // scenario itself tests the price-change case.
    book.modify_limit_order(20, 5, 51);
    book.modify_limit_order(20, 5, 50);

    book.add_limit_order(99, Side::Sell, 5, 50);

    assert!(book.search_order(21).is_none(), "21 fills, not 20");
    assert_eq!(book.search_order(20).unwrap().shares, 5);
}

#[test]
fn scenario_4_immediate_stop_trigger() {
    let mut book = Book::new();
    book.add_limit_order(1, Side::Sell, 10, 100);
    book.add_stop_order(2, Side::Buy, 5, 100);

    assert!(book.search_order(2).is_none());
    assert_eq!(book.search_order(1).unwrap().shares, 5);
    assert_eq!(book.stop_buy_limits().len(), 0);
}

#[test]
fn scenario_5_stop_cascade_snapshot_once() {
    let mut book = Book::new();
    book.add_limit_order(1, Side::Sell, 10, 100);
    book.add_limit_order(2, Side::Sell, 10, 101);
    book.add_stop_order(3, Side::Buy, 5, 101);
    book.add_stop_order(4, Side::Buy, 5, 102);

    book.add_limit_order(99, Side::Buy, 10, 100);

    assert!(book.search_order(3).is_none(), "stop@101 triggers");
    assert!(book.search_order(4).is_some(), "stop@102 does not, snapshot-once");
}

#[test]
fn scenario_6_cancel_unknown() {
    let mut book = Book::new();
    book.cancel_limit_order(42);
    assert_eq!(book.buy_limits().len(), 0);
    assert_eq!(book.sell_limits().len(), 0);
    assert_eq!(book.executed_count(), 0);
}
