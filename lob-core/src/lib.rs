use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

pub mod engine;

pub mod prelude {
    pub use crate::engine::prelude::*;
}
