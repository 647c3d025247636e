//! Offline source
//!
//! When no live backend is reachable the explorer runs against a bundled
//! dump: one JSON document per product with flat `option` and `object`
//! record arrays linked through their `name`/`parent` fields. The dump is
//! reshaped once at construction into the child-indexed structure the
//! live endpoints serve, and never mutated afterwards.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use apiref_model::{Member, MemberPath};

use crate::{ApiSource, DataError, Endpoint, Payload};

/// Flat per-product record arrays, as stored in the dump file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductDump {
    pub option: Vec<Member>,
    pub object: Vec<Member>,
}

/// Per-namespace child index.
#[derive(Debug, Default)]
struct NamespaceIndex {
    /// First-level members, in dump order.
    main: Vec<Member>,
    /// Canonical wire name of a parent to its details and children.
    slots: HashMap<String, Slot>,
}

#[derive(Debug, Default)]
struct Slot {
    /// `None` while the parent is only known from a child's `parent`
    /// link; filled in when the declared parent record arrives.
    details: Option<Member>,
    children: Vec<Member>,
}

impl NamespaceIndex {
    fn fill(&mut self, records: &[Member], names: &mut Vec<String>) {
        for record in records {
            let path = MemberPath::parse_wire(&record.name);
            names.push(record.name.clone());

            if record.is_parent {
                if path.len() == 1 {
                    self.main.push(record.clone());
                }
                self.slots
                    .entry(path.wire())
                    .or_default()
                    .details = Some(record.clone());
            }

            let parent_key = MemberPath::parse_wire(&record.parent).wire();
            self.slots
                .entry(parent_key)
                .or_default()
                .children
                .push(record.clone());
        }
    }

    fn children(&self, name: &str) -> Vec<Member> {
        let key = MemberPath::parse_wire(name).wire();
        self.slots
            .get(&key)
            .map(|slot| slot.children.clone())
            .unwrap_or_default()
    }
}

/// Listing source backed by a reshaped dump.
///
/// Serves byte-for-byte the payload shapes the live endpoints return,
/// including an empty list (not an error) for a parent without children.
#[derive(Debug)]
pub struct OfflineSource {
    names: Vec<String>,
    option: NamespaceIndex,
    object: NamespaceIndex,
}

impl OfflineSource {
    /// Build the index from one product's dump.
    pub fn from_dump(dump: &ProductDump) -> Self {
        let mut names = Vec::new();
        let mut option = NamespaceIndex::default();
        let mut object = NamespaceIndex::default();
        option.fill(&dump.option, &mut names);
        object.fill(&dump.object, &mut names);
        tracing::info!(
            records = names.len(),
            parents = option.slots.len() + object.slots.len(),
            "offline index built"
        );
        Self {
            names,
            option,
            object,
        }
    }

    /// Load a dump file keyed by product and index `product`.
    pub fn from_file(path: &Path, product: &str) -> Result<Self, DataError> {
        let raw = std::fs::read_to_string(path).map_err(|e| DataError::Dump(e.to_string()))?;
        let dumps: HashMap<String, ProductDump> =
            serde_json::from_str(&raw).map_err(|e| DataError::Decode(e.to_string()))?;
        let dump = dumps
            .get(product)
            .ok_or_else(|| DataError::Dump(format!("product {product} not in dump")))?;
        Ok(Self::from_dump(dump))
    }
}

impl ApiSource for OfflineSource {
    fn fetch(&self, endpoint: &Endpoint) -> Result<Payload, DataError> {
        let payload = match endpoint {
            Endpoint::Names => Payload::Names(self.names.clone()),
            Endpoint::MainOptions => Payload::Members(self.option.main.clone()),
            Endpoint::MainObjects => Payload::Members(self.object.main.clone()),
            Endpoint::ChildOptions { name } => Payload::Members(self.option.children(name)),
            Endpoint::ChildObjects { name } => Payload::Members(self.object.children(name)),
        };
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dump() -> ProductDump {
        serde_json::from_value(json!({
            "option": [
                // Child listed before its parent: the parent slot starts
                // as a placeholder and is upgraded later.
                {"name": "chart-type", "fullname": "chart.type", "title": "type",
                 "type": "option", "parent": "chart", "returnType": "String"},
                {"name": "chart", "fullname": "chart", "title": "chart",
                 "type": "option", "parent": "", "isParent": true},
                {"name": "title", "fullname": "title", "title": "title",
                 "type": "option", "parent": "", "isParent": true},
                {"name": "chart-events", "fullname": "chart.events", "title": "events",
                 "type": "option", "parent": "chart", "isParent": true}
            ],
            "object": [
                {"name": "Chart", "fullname": "Chart", "title": "Chart",
                 "type": "object", "parent": "", "isParent": true},
                {"name": "Chart--addSeries", "fullname": "Chart.addSeries",
                 "title": "addSeries", "type": "method", "parent": "Chart"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_names_cover_both_namespaces() {
        let source = OfflineSource::from_dump(&dump());
        let names = source.fetch_names().unwrap();
        assert_eq!(
            names,
            vec![
                "chart-type",
                "chart",
                "title",
                "chart-events",
                "Chart",
                "Chart--addSeries",
            ]
        );
    }

    #[test]
    fn test_main_lists_keep_dump_order() {
        let source = OfflineSource::from_dump(&dump());
        let main: Vec<String> = source
            .fetch_members(&Endpoint::MainOptions)
            .unwrap()
            .into_iter()
            .map(|m| m.fullname)
            .collect();
        assert_eq!(main, vec!["chart", "title"]);

        let objects = source.fetch_members(&Endpoint::MainObjects).unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].fullname, "Chart");
    }

    #[test]
    fn test_child_lookup_matches_live_shape() {
        let source = OfflineSource::from_dump(&dump());
        let children = source
            .fetch_members(&Endpoint::ChildOptions { name: "chart".to_string() })
            .unwrap();
        let fullnames: Vec<&str> = children.iter().map(|m| m.fullname.as_str()).collect();
        assert_eq!(fullnames, vec!["chart.type", "chart.events"]);
        assert_eq!(children[0].return_type.as_deref(), Some("String"));

        let methods = source
            .fetch_members(&Endpoint::ChildObjects { name: "Chart".to_string() })
            .unwrap();
        assert_eq!(methods[0].fullname, "Chart.addSeries");
    }

    #[test]
    fn test_childless_parent_yields_empty_list() {
        let source = OfflineSource::from_dump(&dump());
        let children = source
            .fetch_members(&Endpoint::ChildOptions { name: "title".to_string() })
            .unwrap();
        assert!(children.is_empty());
    }

    #[test]
    fn test_child_key_normalizes_hyphen_runs() {
        let source = OfflineSource::from_dump(&dump());
        let double = source
            .fetch_members(&Endpoint::ChildObjects { name: "Chart".to_string() })
            .unwrap();
        // The dump linked this child with a double-hyphen name; the
        // canonical key still finds it.
        assert_eq!(double.len(), 1);
    }

    #[test]
    fn test_placeholder_parent_upgraded() {
        let source = OfflineSource::from_dump(&dump());
        let slot = source.option.slots.get("chart").unwrap();
        assert!(slot.details.as_ref().unwrap().is_parent);
        assert_eq!(slot.children.len(), 2);
    }
}
