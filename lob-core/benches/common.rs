use lob_core::prelude::*;

/// Seeds a book with `n` resting sell levels and `n` resting buy orders
/// priced to cross the top of the book, for a throughput benchmark.
#[allow(dead_code)]
pub fn seeded_book(n: u64) -> Book {
    let mut book = Book::new();
    for i in 0..n {
        book.add_limit_order(i, Side::Sell, 10, 1000 + (i % 500));
    }
    book
}
