/// Default sale price per kilogram of mixed batch waste (currency units/kg).
/// Used to derive batch revenue when no explicit revenue has been recorded.
pub const DEFAULT_PRICE_PER_KG: f64 = 30.0;

/// Fraction of batch revenue that forms the society reward pool.
/// The facility retains the remainder.
pub const REWARD_POOL_FRACTION: f64 = 0.15;

/// Society quality score above which a payout is classified as released.
pub const RELEASE_SCORE_THRESHOLD: u8 = 80;

/// Segregation score below which a quality alert is raised for a batch.
pub const QUALITY_ALERT_THRESHOLD: u8 = 80;

/// Hours a batch may sit in `Collected` before a delay alert is raised.
pub const COLLECTION_DELAY_ALERT_HOURS: f64 = 2.0;

/// Buyer name recorded when a reserve/purchase action names no buyer.
pub const DEMO_BUYER: &str = "Demo Buyer Pvt Ltd";
