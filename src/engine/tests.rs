#![allow(clippy::unwrap_used)]

mod columns;
mod duplicates;
mod replace;
