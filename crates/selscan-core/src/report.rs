use serde::Serialize;

use crate::classify::Bucket;
use crate::order;

/// The five simple-selector accumulations. During decomposition these hold
/// raw, possibly-duplicated contributions; [`SimpleBuckets::sort_unique`]
/// turns them into their canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimpleBuckets {
    pub all: Vec<String>,
    pub ids: Vec<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<String>,
    pub types: Vec<String>,
}

impl SimpleBuckets {
    pub fn push(&mut self, bucket: Bucket, text: String) {
        match bucket {
            Bucket::Ids => self.ids.push(text),
            Bucket::Classes => self.classes.push(text),
            Bucket::Attributes => self.attributes.push(text),
            Bucket::Types => self.types.push(text),
        }
    }

    pub fn get(&self, bucket: Bucket) -> &[String] {
        match bucket {
            Bucket::Ids => &self.ids,
            Bucket::Classes => &self.classes,
            Bucket::Attributes => &self.attributes,
            Bucket::Types => &self.types,
        }
    }

    /// Apply the canonical dedup/order to every bucket independently. The
    /// same comparator orders all of them, so each bucket's order is a
    /// sub-sequence of the order the `all` bucket implies.
    pub fn sort_unique(self) -> Self {
        Self {
            all: order::sort_unique(self.all),
            ids: order::sort_unique(self.ids),
            classes: order::sort_unique(self.classes),
            attributes: order::sort_unique(self.attributes),
            types: order::sort_unique(self.types),
        }
    }
}

/// The fully assembled result of one run, before any include filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    pub selectors: Vec<String>,
    pub simple: SimpleBuckets,
}

impl Inventory {
    pub fn into_report(self) -> Report {
        Report {
            selectors: Some(self.selectors),
            simple_selectors: Some(SimpleSelectorView::Buckets(self.simple)),
            ..Report::default()
        }
    }
}

/// The `simpleSelectors` key carries the full bucket map in an unfiltered
/// report, but only the flat `all` list when requested through the include
/// filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SimpleSelectorView {
    Buckets(SimpleBuckets),
    All(Vec<String>),
}

/// The externally visible report. Absent fields are omitted from the JSON
/// output, so the empty report serializes as `{}` and a filtered report
/// carries only the requested keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selectors: Option<Vec<String>>,
    #[serde(rename = "simpleSelectors", skip_serializing_if = "Option::is_none")]
    pub simple_selectors: Option<SimpleSelectorView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

impl Report {
    /// The literal empty report emitted when no selectors were found.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
