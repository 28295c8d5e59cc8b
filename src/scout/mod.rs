pub mod scanner;

pub use scanner::TokenScanner;
