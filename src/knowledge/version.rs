//! Version comparison and availability filtering.

use std::cmp::Ordering;

use super::facts::Availability;

/// Which facts an index admits. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexFilter {
    pub version: Option<String>,
    pub platform: Option<String>,
}

impl IndexFilter {
    /// Admit every fact.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(version: Option<&str>, platform: Option<&str>) -> Self {
        Self {
            version: version.map(str::to_owned),
            platform: platform.map(str::to_owned),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.version.is_none() && self.platform.is_none()
    }

    /// True if some listed version is at most the requested one and lists
    /// the requested platform.
    ///
    /// Without a filter everything is admitted, including facts that list
    /// no availability at all.
    pub fn admits(&self, availability: &Availability) -> bool {
        if self.is_unfiltered() {
            return true;
        }
        availability.iter().any(|(version, platforms)| {
            let version_ok = self
                .version
                .as_deref()
                .is_none_or(|wanted| compare_versions(wanted, version) != Ordering::Less);
            let platform_ok = self
                .platform
                .as_deref()
                .is_none_or(|wanted| platforms.iter().any(|p| p == wanted));
            version_ok && platform_ok
        })
    }
}

/// Compare dotted versions numerically segment by segment.
///
/// Missing segments count as `0`, so `9` equals `9.0.0`. Segments are read
/// up to their first non-digit; a segment without leading digits is `0`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (l, r) => {
                let ordering = segment(l).cmp(&segment(r));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

fn segment(part: Option<&str>) -> u64 {
    let Some(part) = part else {
        return 0;
    };
    let digits = part.trim();
    let end = digits
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().unwrap_or(0)
}
