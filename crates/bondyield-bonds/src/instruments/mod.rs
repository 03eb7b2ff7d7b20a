//! Bond instruments.

mod bond;

pub use bond::{
    Bond, BondBuilder, DEFAULT_COUPON_PERIOD, DEFAULT_COUPON_RATE_PCT, DEFAULT_FACE_VALUE,
    DEFAULT_MARKET_PRICE, DEFAULT_TENOR,
};
