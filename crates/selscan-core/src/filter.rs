use std::fmt;
use std::str::FromStr;

use crate::classify::Bucket;
use crate::diagnostics::Diagnostics;
use crate::report::{Inventory, Report, SimpleSelectorView};

/// The closed include vocabulary. `Simple` is an accepted alias of
/// `SimpleSelectors`; both copy the `all` bucket under the
/// `simpleSelectors` output key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Include {
    Selectors,
    SimpleSelectors,
    Simple,
    Classes,
    Ids,
    Attributes,
    Types,
}

/// Every accepted include name, in the order the warning message lists them.
pub const INCLUDE_NAMES: &[&str] = &[
    "selectors",
    "simpleSelectors",
    "simple",
    "classes",
    "ids",
    "attributes",
    "types",
];

impl FromStr for Include {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "selectors" => Ok(Include::Selectors),
            "simpleSelectors" => Ok(Include::SimpleSelectors),
            "simple" => Ok(Include::Simple),
            "classes" => Ok(Include::Classes),
            "ids" => Ok(Include::Ids),
            "attributes" => Ok(Include::Attributes),
            "types" => Ok(Include::Types),
            _ => Err(anyhow::anyhow!("unknown include name: {s}")),
        }
    }
}

impl fmt::Display for Include {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Include::Selectors => "selectors",
            Include::SimpleSelectors => "simpleSelectors",
            Include::Simple => "simple",
            Include::Classes => "classes",
            Include::Ids => "ids",
            Include::Attributes => "attributes",
            Include::Types => "types",
        };
        write!(f, "{name}")
    }
}

/// Narrow a full inventory to the requested views.
///
/// An empty request is the identity: the full report comes back. Any name
/// outside the vocabulary degrades the whole filter: one warning, then the
/// complete unfiltered report, never a partial one.
pub fn apply(inventory: &Inventory, includes: &[String], diag: &mut Diagnostics) -> Report {
    if includes.is_empty() {
        return inventory.clone().into_report();
    }

    let mut filtered = Report::default();
    for name in includes {
        let include = match name.parse::<Include>() {
            Ok(include) => include,
            Err(_) => {
                diag.warn(format!(
                    "Invalid include \"{name}\" requested. The possibilities are: {}. \
                     You'll get the full selector list now.",
                    INCLUDE_NAMES.join(", ")
                ));
                return inventory.clone().into_report();
            }
        };
        match include {
            Include::Selectors => {
                filtered.selectors = Some(inventory.selectors.clone());
            }
            Include::SimpleSelectors | Include::Simple => {
                filtered.simple_selectors =
                    Some(SimpleSelectorView::All(inventory.simple.all.clone()));
            }
            Include::Classes => {
                filtered.classes = Some(inventory.simple.get(Bucket::Classes).to_vec());
            }
            Include::Ids => {
                filtered.ids = Some(inventory.simple.get(Bucket::Ids).to_vec());
            }
            Include::Attributes => {
                filtered.attributes = Some(inventory.simple.get(Bucket::Attributes).to_vec());
            }
            Include::Types => {
                filtered.types = Some(inventory.simple.get(Bucket::Types).to_vec());
            }
        }
    }
    filtered
}
