// Age curve: performance multiplier and offseason skill growth.

/// Output of the aging model for one season.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgingProfile {
    /// Multiplier applied to every attribute-derived stat.
    pub age_factor: f64,
    /// Upper bound on the random offseason gain for each skill rating.
    /// Never negative.
    pub skill_improvement: f64,
}

impl AgingProfile {
    pub fn new(age: i32, work_ethic: f64) -> Self {
        AgingProfile {
            age_factor: age_factor(age, work_ethic),
            skill_improvement: skill_improvement(age, work_ethic),
        }
    }
}

/// Unadjusted age curve. Development through 21, a slow rise to the 28-32
/// prime, then a cliff at 33 that keeps falling by 0.05 a year. The decline
/// is not floored and reaches zero at 45.
pub fn base_age_factor(age: i32) -> f64 {
    let age_f = age as f64;
    if age < 22 {
        0.8 + (age_f - 19.0) * 0.07
    } else if age < 28 {
        0.95 + (age_f - 22.0) * 0.01
    } else if age < 33 {
        1.0
    } else {
        0.6 - (age_f - 33.0) * 0.05
    }
}

/// Age curve adjusted for work ethic: young players develop faster, veterans
/// decline slower, 27-32 is unaffected.
pub fn age_factor(age: i32, work_ethic: f64) -> f64 {
    let mut factor = base_age_factor(age);
    if age < 27 {
        factor += (work_ethic / 100.0) * 0.1;
    } else if age > 32 {
        factor += (work_ethic / 100.0) * 0.05;
    }
    factor
}

/// `max(0, work_ethic/20 - age/10)`.
pub fn skill_improvement(age: i32, work_ethic: f64) -> f64 {
    (work_ethic / 20.0 - age as f64 / 10.0).max(0.0)
}
