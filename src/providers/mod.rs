pub mod freecurrency;

pub use freecurrency::FreeCurrencyApiProvider;
