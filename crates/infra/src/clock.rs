//! System clock in the target timezone.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use poroherald_core::Clock;
use poroherald_domain::constants::TARGET_TZ;

/// Wall-clock time source, converted to the fixed target timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&TARGET_TZ)
    }
}
