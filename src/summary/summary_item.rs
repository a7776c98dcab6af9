use crate::model::LogType;

/// A diagnostic lifted out of the evaluation tree, along with where it was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryItem {
    pub evaluation_name: Option<String>,

    pub log_type: LogType,

    pub message: String,

    /// Node names from the root down to the node that raised the diagnostic.
    pub path: Vec<String>,
}

impl SummaryItem {
    /// The path as shown in reports, e.g. `app > express > debug`.
    #[must_use]
    pub fn display_path(&self) -> String {
        self.path.join(" > ")
    }
}

/// All non-informational diagnostics of a tree, in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub items: Vec<SummaryItem>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl Summary {
    /// Items of the given type, in report order.
    pub fn items_of<'a>(&'a self, log_type: &'a LogType) -> impl Iterator<Item = &'a SummaryItem> {
        self.items.iter().filter(move |item| item.log_type == *log_type)
    }
}
