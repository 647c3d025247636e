//! Member registry
//!
//! Session-wide map from dotted identifiers to member records, filled in
//! as listing fragments arrive. Append-only: nothing is ever removed, and
//! a record arriving twice overwrites the earlier one (declared parent
//! data replaces a placeholder inferred from a child).

use std::collections::HashMap;

use crate::Member;

/// Map of every member seen this session, keyed by dotted `fullname`.
#[derive(Debug, Default)]
pub struct MemberRegistry {
    members: HashMap<String, Member>,
    placeholder: Member,
}

impl MemberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a record under its `fullname`.
    ///
    /// Records without a `fullname` are dropped; they cannot be addressed.
    pub fn store(&mut self, member: Member) {
        if member.fullname.is_empty() {
            return;
        }
        self.members.insert(member.fullname.clone(), member);
    }

    /// Look up a record by dotted name.
    ///
    /// Never fails: unknown names yield an empty placeholder record, so
    /// title and metadata generation can run before (or without) the
    /// member ever loading.
    pub fn get(&self, fullname: &str) -> &Member {
        self.members.get(fullname).unwrap_or(&self.placeholder)
    }

    pub fn contains(&self, fullname: &str) -> bool {
        self.members.contains_key(fullname)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemberKind;

    fn member(fullname: &str, kind: MemberKind) -> Member {
        Member {
            fullname: fullname.to_string(),
            title: fullname.rsplit('.').next().unwrap_or_default().to_string(),
            kind,
            ..Member::default()
        }
    }

    #[test]
    fn test_get_unknown_returns_placeholder() {
        let registry = MemberRegistry::new();
        let record = registry.get("never.loaded");
        assert!(record.is_placeholder());
        assert!(record.pretty_name().is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let mut registry = MemberRegistry::new();
        registry.store(member("chart", MemberKind::Option));
        let mut update = member("chart", MemberKind::Option);
        update.description = Some("Chart options.".to_string());
        registry.store(update);

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("chart").description.as_deref(),
            Some("Chart options.")
        );
    }

    #[test]
    fn test_store_rejects_unaddressable_records() {
        let mut registry = MemberRegistry::new();
        registry.store(Member::default());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_method_pretty_name_through_registry() {
        let mut registry = MemberRegistry::new();
        registry.store(member("Chart.addSeries", MemberKind::Method));
        assert_eq!(
            registry.get("Chart.addSeries").pretty_name().unwrap(),
            "Chart.addSeries()"
        );
    }
}
