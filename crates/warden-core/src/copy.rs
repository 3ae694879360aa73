//! User-facing copy helpers shared by confirmation modals and notifications.

/// A noun with its singular and plural spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Noun {
    pub singular: &'static str,
    pub plural: &'static str,
}

impl Noun {
    pub const DETECTION: Self = Self::new("detection", "detections");
    pub const RULE: Self = Self::new("rule", "rules");
    pub const POLICY: Self = Self::new("policy", "policies");
    pub const DATA_MODEL: Self = Self::new("Data Model", "Data Models");
    pub const SAVED_QUERY: Self = Self::new("Saved Query", "Saved Queries");

    #[must_use]
    pub const fn new(singular: &'static str, plural: &'static str) -> Self {
        Self { singular, plural }
    }

    /// `"detection"` for one item, `"3 detections"` otherwise.
    #[must_use]
    pub fn counted(self, count: usize) -> String {
        to_plural(self.singular, &format!("{count} {}", self.plural), count)
    }
}

/// Pick `singular` for exactly one item and `plural` for anything else.
#[must_use]
pub fn to_plural(singular: &str, plural: &str, count: usize) -> String {
    if count == 1 {
        singular.to_string()
    } else {
        plural.to_string()
    }
}

/// Join names as `A`, `A and B`, `A, B and C`.
///
/// The first name is bare, middle names are prefixed with `", "` and the last
/// one with `" and "`.
#[must_use]
pub fn join_names<S: AsRef<str>>(names: &[S]) -> String {
    let last = names.len().saturating_sub(1);
    let mut joined = String::new();
    for (i, name) in names.iter().enumerate() {
        let name = name.as_ref();
        if i == 0 {
            joined.push_str(name);
        } else if i == last {
            joined.push_str(" and ");
            joined.push_str(name);
        } else {
            joined.push_str(", ");
            joined.push_str(name);
        }
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, "detection")]
    #[case(0, "0 detections")]
    #[case(3, "3 detections")]
    fn counted_detection_copy(#[case] count: usize, #[case] expected: &str) {
        assert_eq!(Noun::DETECTION.counted(count), expected);
    }

    #[rstest]
    #[case(&[], "")]
    #[case(&["Okta"], "Okta")]
    #[case(&["Okta", "GSuite"], "Okta and GSuite")]
    #[case(&["Okta", "GSuite", "Box", "Zoom"], "Okta, GSuite, Box and Zoom")]
    fn joins_names(#[case] names: &[&str], #[case] expected: &str) {
        assert_eq!(join_names(names), expected);
    }
}
